use mock_server::Credentials;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let user = std::env::var("MOCK_USER").unwrap_or_else(|_| "admin".to_string());
    let token = std::env::var("MOCK_TOKEN").unwrap_or_else(|_| "token".to_string());
    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    println!("listening on http://{addr}{}", mock_server::API_PATH);
    mock_server::run(listener, Credentials::new(user, token)).await
}
