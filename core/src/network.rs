pub mod ping;
pub mod tcp;

pub use ping::PingProbe;
pub use tcp::TcpProbe;
