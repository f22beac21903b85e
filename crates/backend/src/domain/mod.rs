pub mod a001_customer;
pub mod a002_role;
pub mod a003_navigation_config;
