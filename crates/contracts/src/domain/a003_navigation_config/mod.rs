pub mod aggregate;

pub use aggregate::{
    NavigationConfig, NavigationConfigData, NavigationConfigDto, NavigationConfigId,
};
