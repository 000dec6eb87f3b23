/// Owner of notifications. Only the identity is tracked here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct User {
    pub id: i64,
}

/// Film a notification refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Film {
    pub id: i64,
}
