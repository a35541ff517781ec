//! Output formatting module

use serde::Serialize;
use serde_json::json;
use vitrine_app::admin::Dashboard;
use vitrine_app::booking::Booking;
use vitrine_domain::model::{Item, Reservation, Settings};
use vitrine_domain::service::format_price;
use vitrine_types::{OutputFormat, Result};

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn price_label(item: &Item) -> String {
    format_price(item.price(), item.category().is_monthly())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}

pub fn output_items(format: OutputFormat, items: &[Item]) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(items);
    }

    if items.is_empty() {
        println!("No items.");
        return Ok(());
    }

    println!(
        "{:>14}  {:<9}  {:<4}  {:<32}  {:>20}  {}",
        "ID", "KIND", "CAT", "TITLE", "PRICE", "AVAILABLE"
    );
    for item in items {
        println!(
            "{:>14}  {:<9}  {:<4}  {:<32}  {:>20}  {}",
            item.id(),
            item.kind(),
            item.category(),
            truncate(item.title(), 32),
            price_label(item),
            if item.available() { "yes" } else { "no" }
        );
    }
    println!("\n{} item(s)", items.len());
    Ok(())
}

pub fn output_item(format: OutputFormat, item: &Item) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(item);
    }

    println!("\n{}", item.title());
    println!("{}", "=".repeat(item.title().chars().count().max(4)));
    println!("ID:          {}", item.id());
    println!("Kind:        {}", item.kind());
    println!("Category:    {}", item.category().label());
    println!("Price:       {}", price_label(item));
    println!("Available:   {}", if item.available() { "yes" } else { "no" });
    match item {
        Item::Vehicle(v) if !v.vehicle_type.is_empty() => {
            println!("Type:        {}", v.vehicle_type)
        }
        Item::Residence(r) if !r.location.is_empty() => {
            println!("Location:    {}", r.location)
        }
        _ => {}
    }
    if !item.features().is_empty() {
        println!("Features:    {}", item.features().join(", "));
    }
    if !item.description().is_empty() {
        println!("\n{}", item.description());
    }
    Ok(())
}

pub fn output_reservations(format: OutputFormat, reservations: &[Reservation]) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(reservations);
    }

    if reservations.is_empty() {
        println!("No reservations.");
        return Ok(());
    }

    println!(
        "{:>14}  {:>14}  {:<24}  {:<10}  {:<10}  {}",
        "ID", "ITEM", "CUSTOMER", "DATE", "STATUS", "TITLE"
    );
    for r in reservations {
        println!(
            "{:>14}  {:>14}  {:<24}  {:<10}  {:<10}  {}",
            r.id,
            r.item_id,
            truncate(&r.customer_name, 24),
            r.requested_date.format("%Y-%m-%d"),
            r.status,
            r.item_title.as_deref().unwrap_or("-")
        );
    }
    println!("\n{} reservation(s)", reservations.len());
    Ok(())
}

pub fn output_settings(format: OutputFormat, settings: &Settings) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(settings);
    }

    println!("Site Settings");
    println!("=============");
    println!("Name:           {}", settings.name);
    println!("Description:    {}", settings.description);
    println!("Phone:          {}", settings.contact_phone);
    if !settings.other_phones.is_empty() {
        println!("Other phones:   {}", settings.other_phones.join(", "));
    }
    println!("Email:          {}", settings.contact_email);
    println!("Mon-Fri:        {}", settings.business_hours.weekday);
    println!("Saturday:       {}", settings.business_hours.saturday);
    Ok(())
}

pub fn output_dashboard(format: OutputFormat, dashboard: &Dashboard) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(dashboard);
    }
    print!("{}", dashboard);
    Ok(())
}

pub fn output_booking(format: OutputFormat, booking: &Booking) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(&json!({
            "reservation": booking.reservation,
            "item": booking.item,
            "message": booking.message,
            "link": booking.link.as_str(),
        }));
    }

    println!("Reservation {} recorded ({})", booking.reservation.id, booking.reservation.status);
    println!("\n{}", booking.message);
    println!("\nSend to the business:");
    println!("{}", booking.link);
    Ok(())
}
