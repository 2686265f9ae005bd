//! Column names of the used-car listings dataset.

pub const PRICE: &str = "price";
pub const BRAND: &str = "brand";
pub const MANUFACTURER: &str = "manufacturer";
pub const CURRENCY: &str = "currency";
pub const FUEL_TYPE: &str = "fuel_type";
pub const ITEM_CONDITION: &str = "item_condition";
pub const VEHICLE_TRANSMISSION: &str = "vehicle_transmission";
pub const MODEL_DATE: &str = "model_date";

pub const MILEAGE_SOURCE: &str = "mileage_from_odometer";
pub const ENGINE_SOURCE: &str = "vehicle_engine";
pub const MILEAGE_NUMERIC: &str = "mileage_numeric";
pub const ENGINE_NUMERIC: &str = "engine_numeric";

/// Leading index column left behind when a dataframe is saved with its index.
pub const UNNAMED_INDEX: &str = "Unnamed: 0";

/// Columns summarized by frequency in the categorical report.
pub const CATEGORICAL: [&str; 6] = [
    BRAND,
    CURRENCY,
    FUEL_TYPE,
    ITEM_CONDITION,
    MANUFACTURER,
    VEHICLE_TRANSMISSION,
];

/// Columns summarized by descriptive statistics and correlated with price.
pub const NUMERICAL: [&str; 4] = [PRICE, MILEAGE_NUMERIC, MODEL_DATE, ENGINE_NUMERIC];
