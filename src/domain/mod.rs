//! Domain layer: the employee record, the allowance rule and the ports the
//! application layer talks to.

pub mod allowance;
pub mod employee;
pub mod notification;
pub mod ports;
