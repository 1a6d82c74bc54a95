use academy_api::endpoints::{Listing, video::Course};
use academy_api::{ApiError, ApiRequest, HttpTransport, Request, Transport};
use std::time::Duration;

#[tokio::main]
pub async fn main() -> Result<(), ApiError> {
    let transport = HttpTransport::new("http://localhost:8000", Duration::from_secs(10))?;

    let req = Request::video().courses().page(1u32);

    let courses: Listing<Course> = transport
        .execute(&req.descriptor())
        .await?
        .error_for_status()?
        .json()?;
    for course in courses.into_items() {
        println!("{} {}", course.id, course.title);
    }
    Ok(())
}
