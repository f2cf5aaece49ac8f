pub mod order;

pub async fn health() -> &'static str {
    "ok"
}
