pub use super::currencies::Entity as Currencies;
pub use super::currency_rates::Entity as CurrencyRates;
pub use super::metal_reference_history::Entity as MetalReferenceHistory;
pub use super::metals::Entity as Metals;
pub use super::quotes::Entity as Quotes;
pub use super::variants::Entity as Variants;
