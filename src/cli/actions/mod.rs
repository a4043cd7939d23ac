pub mod server;

#[derive(Debug)]
pub enum Action {
    Server {
        port: u16,
        dsn: String,
        frontend_base_url: String,
        session_ttl_seconds: i64,
    },
}
