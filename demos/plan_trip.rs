//! End-to-end demo: plan a trip against the real Google Maps APIs.
//!
//! ```sh
//! GOOGLE_API_KEY=... cargo run --example plan_trip --features http -- "Paris" 3 medium food art
//! ```

use std::env;

use trip_planner::{build_trip, BudgetTier, GoogleMapsClient, TripRequest};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // The API key crosses the boundary here, once; the planner itself never
    // touches credentials.
    let api_key = env::var("GOOGLE_API_KEY")
        .map_err(|_| "set GOOGLE_API_KEY to a Google Maps API key")?;

    let mut args = env::args().skip(1);
    let destination = args.next().unwrap_or_else(|| "Paris".to_string());
    let days: u32 = args.next().as_deref().unwrap_or("2").parse()?;
    let budget = BudgetTier::parse(args.next().as_deref().unwrap_or("medium"));
    let interests: Vec<String> = args.collect();

    let request = TripRequest { destination, days, budget, interests };
    request.validate()?;

    let provider = GoogleMapsClient::new(api_key)?;
    let trip = build_trip(&provider, &request).await?;

    for day in &trip.days {
        println!("Day {}:", day.day);
        for place in &day.places {
            let slot = place.slot.map(|s| s.as_str()).unwrap_or("-");
            println!(
                "  [{slot}] {} ({:.1} stars, {} reviews) - {}",
                place.name, place.rating, place.user_ratings_total, place.address
            );
        }
        match &day.route_polyline {
            Some(polyline) => println!("  route: {} chars of encoded polyline", polyline.len()),
            None => println!("  route: unavailable"),
        }
    }

    println!("\n{}", serde_json::to_string_pretty(&trip)?);
    Ok(())
}
