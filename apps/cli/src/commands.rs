//! Command handlers. Results are printed to stdout as pretty JSON.

use std::path::Path;

use anyhow::{Context, Result};
use quadra_core::{
    AppSettingsService, ApplicationServices, AuthContext, ListingPolicy, SortField, SortOrder,
    Space, SpaceFilters,
};
use serde::Serialize;
use serde_json::Value;
use tracing::info;

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn auth(services: &ApplicationServices) -> Result<&AuthContext> {
    services
        .auth()
        .context("Accounts are not configured for this catalogue")
}

pub async fn list(services: &ApplicationServices) -> Result<()> {
    print_json(&services.controller.list().await?)
}

pub async fn search(
    services: &ApplicationServices,
    sport: Option<String>,
    min_price: Option<f64>,
    max_price: Option<f64>,
    rating: Option<f64>,
) -> Result<()> {
    let filters = SpaceFilters {
        sport,
        min_price,
        max_price,
        rating,
    };
    print_json(&services.controller.search(&filters).await?)
}

pub async fn show(services: &ApplicationServices, id: &str) -> Result<()> {
    print_json(&services.controller.get(id).await?)
}

pub async fn nearby(
    services: &ApplicationServices,
    latitude: f64,
    longitude: f64,
    radius_km: f64,
) -> Result<()> {
    print_json(
        &services
            .controller
            .nearby(latitude, longitude, radius_km)
            .await?,
    )
}

pub async fn sorted(services: &ApplicationServices, field: SortField, order: SortOrder) -> Result<()> {
    let spaces = services.space_repo.find_all_sorted(field, order).await?;
    print_json(&services.controller.present(&spaces))
}

/// Parse a JSON array of space records.
pub fn parse_import(contents: &str) -> Result<Vec<Space>> {
    let records: Vec<Value> =
        serde_json::from_str(contents).context("Import file must be a JSON array of spaces")?;

    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            Space::from_data(record).with_context(|| format!("Invalid space at index {}", index))
        })
        .collect()
}

pub async fn import(services: &ApplicationServices, file: &Path) -> Result<()> {
    let contents = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {:?}", file))?;
    let spaces = parse_import(&contents)?;

    let repo = &services.space_repo;
    let (mut created, mut updated) = (0usize, 0usize);
    for space in &spaces {
        if repo.find_by_id(space.id()).await?.is_some() {
            repo.update(space).await?;
            updated += 1;
        } else {
            repo.create(space).await?;
            created += 1;
        }
    }

    info!(created, updated, file = ?file, "Import complete");
    print_json(&serde_json::json!({ "created": created, "updated": updated }))
}

pub async fn delete(services: &ApplicationServices, id: &str) -> Result<()> {
    services.space_repo.delete(id).await?;
    info!(id, "Deleted space");
    Ok(())
}

pub async fn policy(settings: &AppSettingsService, value: Option<ListingPolicy>) -> Result<()> {
    if let Some(policy) = value {
        settings.set_listing_policy(policy).await?;
    }
    println!("{}", settings.get_listing_policy().await);
    Ok(())
}

pub async fn radius(settings: &AppSettingsService, value: Option<f64>) -> Result<()> {
    if let Some(radius_km) = value {
        settings.set_nearby_radius_km(radius_km).await?;
    }
    println!("{}", settings.get_nearby_radius_km().await);
    Ok(())
}

pub async fn sign_up(
    services: &ApplicationServices,
    email: &str,
    password: &str,
    display_name: Option<&str>,
) -> Result<()> {
    let profile = auth(services)?
        .sign_up(email, password, display_name)
        .await?;
    print_json(&profile)
}

pub async fn sign_in(services: &ApplicationServices, email: &str, password: &str) -> Result<()> {
    let profile = auth(services)?.sign_in(email, password).await?;
    print_json(&profile)
}

pub async fn change_password(
    services: &ApplicationServices,
    email: &str,
    current: &str,
    new: &str,
) -> Result<()> {
    let auth = auth(services)?;
    auth.sign_in(email, current).await?;
    auth.change_password(current, new).await?;
    auth.logout();
    println!("Password changed");
    Ok(())
}
