mod call;
mod record;

pub use call::*;
pub use record::*;

macro_rules! common_derives {
    ($item:item) => {
        #[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
        #[cfg_attr(feature = "specta", derive(specta::Type))]
        $item
    };
}

pub(crate) use common_derives;
