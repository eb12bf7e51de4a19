use std::io::Write;

use anyhow::{Context, Result};
use chrono::{Days, Local};
use client_core::screens::{
    details::DetailsEdit,
    flights::FlightLeg,
    payment::{self, SimulatedPayment},
};
use tracing::info;

use crate::driver::{Driver, Event};

/// Books a round trip for two from the landing screen to the boarding pass.
pub async fn run<W: Write>(driver: &mut Driver<W>) -> Result<()> {
    driver.settle()?;

    let outcome = driver.app.navigate("/booking")?;
    driver.navigation(outcome)?;
    driver.settle()?;

    let today = Local::now().date_naive();
    let departure = today + Days::new(7);
    let ret = today + Days::new(14);
    driver.app.edit_details(DetailsEdit::To("Tokyo".into()));
    driver.app.edit_details(DetailsEdit::Passengers(2));
    driver.app.set_departure_date(departure);
    driver.app.set_return_date(ret);
    let outcome = driver.app.submit_details()?;
    driver.navigation(outcome)?;
    driver.settle()?;

    let view = driver.app.flights_view();
    let departure_id = view.departures.first().map(|f| f.id.clone()).context("no departures listed")?;
    driver.app.select_flight(FlightLeg::Departure, &departure_id);
    driver.settle()?;
    let view = driver.app.flights_view();
    let return_id = view.returns.first().map(|f| f.id.clone()).context("no returns listed")?;
    driver.app.select_flight(FlightLeg::Return, &return_id);
    driver.settle()?;
    let outcome = driver.app.continue_from_flights()?;
    driver.navigation(outcome)?;
    driver.settle()?;

    if let Some(contact) = driver.app.available_users().first() {
        driver.app.set_passenger_email(0, &contact.email);
    }
    let outcome = driver.app.continue_from_passengers()?;
    driver.navigation(outcome)?;
    driver.settle()?;

    let processor = SimulatedPayment::new(driver.app.settings().payment_delay());
    let receipt = driver.app.pay(&processor).await?;
    info!(amount = receipt.amount, "walkthrough payment complete");
    driver.emit(&Event::Payment(receipt))?;
    driver.settle()?;

    let outcome = driver.app.navigate(payment::success_route())?;
    driver.navigation(outcome)?;
    driver.settle()?;
    driver.frame()
}
