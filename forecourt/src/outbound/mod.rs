//! Driven adapters implementing the domain's ports.

pub mod memory;

pub use self::memory::InMemoryAccountRepository;
