// Domain layer - Pure models with no I/O
pub mod city;
pub mod error;
pub mod forecast;
