pub mod aggregate;

pub use aggregate::{Customer, CustomerDto, CustomerId, SYS_CUSTOMER_CODE};
