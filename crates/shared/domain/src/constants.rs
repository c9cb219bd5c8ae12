//! Domain-level constants.

/// Page requested by the service's list endpoint (1-based)
pub const LIST_PAGE: u64 = 1;

/// Page size requested by the service's list endpoint
pub const LIST_PAGE_SIZE: u64 = 100;
