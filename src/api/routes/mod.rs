pub mod crud;
pub mod dashboard;
pub mod games;
pub mod standings;
pub mod transactions;
