mod alias;
mod code;
mod props;

pub use alias::{normalize, Normalizer};
pub use code::RegionCode;
pub use props::{feature_code, feature_name, first_text, CODE_KEYS, NAME_KEYS, UNKNOWN_NAME};
