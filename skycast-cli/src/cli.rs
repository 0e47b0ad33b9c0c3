use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use inquire::Text;
use skycast_core::{
    Config, FetchState, ForecastEntry, IpLocator, LiveFeed, SearchPanel, WeatherClient,
    WeatherSnapshot, query,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "OpenWeather demo client")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and optional docs link.
    Configure,

    /// Show current weather for a place name or "lat, lon" pair.
    Current {
        /// Free-text location, e.g. "Nairobi" or "-1.28, 36.82".
        query: String,
    },

    /// Show the short upcoming forecast strip for a location.
    Forecast {
        /// Free-text location, e.g. "Nairobi" or "-1.28, 36.82".
        query: String,
    },

    /// Auto-detect the device location and show the live feed.
    Live,

    /// Print the provider documentation link.
    Docs,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Current { query } => current(&query).await,
            Command::Forecast { query } => forecast(&query).await,
            Command::Live => live().await,
            Command::Docs => docs(),
        }
    }
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let api_key = Text::new("OpenWeather API key:")
        .with_help_message("From https://home.openweathermap.org/api_keys")
        .prompt()
        .context("Failed to read API key")?;

    let docs_url = Text::new("Docs URL (optional):")
        .with_help_message("Press enter to skip")
        .prompt()
        .context("Failed to read docs URL")?;

    config.api_key = Some(api_key.trim().to_string()).filter(|key| !key.is_empty());
    config.docs_url = Some(docs_url.trim().to_string()).filter(|url| !url.is_empty());
    config.save()?;

    println!("Saved to {}", Config::config_file_path()?.display());
    Ok(())
}

fn client() -> Result<WeatherClient> {
    let settings = Config::load()?.resolve()?;
    Ok(WeatherClient::new(settings.api_key, settings.base_url))
}

async fn current(raw: &str) -> Result<()> {
    if raw.trim().is_empty() {
        bail!("Please enter a location.");
    }

    let client = client()?;
    let mut panel = SearchPanel::new();
    panel.search(&client, raw).await;

    match panel.state() {
        FetchState::Success(snapshot) => {
            print_snapshot(snapshot);
            Ok(())
        }
        FetchState::Failed(message) => bail!("{message}"),
        // `search` always leaves the panel in a terminal state.
        FetchState::Idle | FetchState::Loading => bail!("No search was performed."),
    }
}

async fn forecast(raw: &str) -> Result<()> {
    if raw.trim().is_empty() {
        bail!("Please enter a location.");
    }

    let client = client()?;
    let query = query::resolve(raw);
    let strip = client
        .fetch_forecast(&query)
        .await
        .map_err(|err| anyhow::anyhow!("{}", err.user_message()))?;

    println!("Upcoming:");
    print_strip(&strip);
    Ok(())
}

async fn live() -> Result<()> {
    let client = client()?;
    let locator = IpLocator::new();
    let mut feed = LiveFeed::new();

    println!("Connecting to live satellites...");
    feed.refresh(&locator, &client).await;

    // Two independent result slots, merged only here at render time: either
    // panel may show data while the other shows its failure message.
    match feed.current() {
        FetchState::Success(snapshot) => {
            println!();
            println!("Live Feed: {}", snapshot.place_name);
            println!();
            print_snapshot(snapshot);
            println!();
            let alert = if snapshot.condition == "Rain" { "Rain Alert" } else { "System Normal" };
            println!("{alert}: {} detected in your vicinity.", snapshot.description);
            println!("Solar visibility: {:.1} km", snapshot.visibility_km());
        }
        FetchState::Failed(message) => println!("Current weather: {message}"),
        FetchState::Idle | FetchState::Loading => {}
    }

    match feed.forecast() {
        FetchState::Success(strip) => {
            println!();
            println!("Upcoming:");
            print_strip(strip);
        }
        FetchState::Failed(message) => println!("Forecast: {message}"),
        FetchState::Idle | FetchState::Loading => {}
    }

    println!();
    println!("Thermal map tile: {}", client.thermal_tile_url());

    if feed.current().failure().is_some() && feed.forecast().failure().is_some() {
        bail!("Live feed unavailable.");
    }
    Ok(())
}

fn docs() -> Result<()> {
    let settings = Config::load()?.resolve()?;
    match settings.docs_url {
        Some(url) => {
            println!("{url}");
            Ok(())
        }
        None => bail!("No docs URL configured. Set OPENWEATHER_DOCS_URL or run `skycast configure`."),
    }
}

fn print_snapshot(snapshot: &WeatherSnapshot) {
    println!("{}, {}", snapshot.place_name, snapshot.country_code);
    println!(
        "{}°C, feels like {}°C. {}",
        snapshot.temperature_c.round(),
        snapshot.feels_like_c.round(),
        capitalize(&snapshot.description),
    );
    println!("  Wind        {} m/s", snapshot.wind_speed_mps);
    println!("  Pressure    {} hPa", snapshot.pressure_hpa);
    println!("  Humidity    {}%", snapshot.humidity_pct);
    println!("  Visibility  {:.1} km", snapshot.visibility_km());
}

fn print_strip(strip: &[ForecastEntry]) {
    for entry in strip {
        println!(
            "  {}  {:>4}°  [{}]",
            entry.at.format("%H:00"),
            entry.temperature_c.round(),
            entry.icon,
        );
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn capitalize_first_letter_only() {
        assert_eq!(capitalize("light rain"), "Light rain");
        assert_eq!(capitalize(""), "");
    }
}
