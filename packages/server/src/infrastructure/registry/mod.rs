//! 接続レジストリとクライアント ID マップのインメモリ実装

pub mod connection;
pub mod identity;

pub use connection::InMemoryConnectionRegistry;
pub use identity::InMemoryIdentityMap;
