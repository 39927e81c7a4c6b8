use fitbit_api::{Client, FitbitApiError, Request};

#[tokio::main]
pub async fn main() -> Result<(), FitbitApiError> {
    let client = Client::new("access_token");

    let today = chrono::Local::now().date_naive();
    let req = Request::activities().daily_summary(today);

    let res = client.send(req).await?;
    println!("steps today: {}", res.summary.steps);
    Ok(())
}
