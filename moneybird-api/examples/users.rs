use moneybird_api::{Client, MoneybirdApiError, Request};

#[tokio::main]
pub async fn main() -> Result<(), MoneybirdApiError> {
    let client = Client::new("api_token");

    let req = Request::users()
        .with_administration("123456789".into())
        .list();

    let _res = client.send(req).await?;
    Ok(())
}
