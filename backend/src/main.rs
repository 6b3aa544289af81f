use anika_blue::error::StartupError;

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    anika_blue::start_server().await
}
