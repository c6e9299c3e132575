use crate::{
    export, Accommodation, Agent, BudgetTier, Credential, Interest, PlannerConfig, PlannerError,
    RequestKind, Transportation, TravelStyle, TripRequest,
};
use anyhow::Context;
use chrono::NaiveDate;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::{env, path::PathBuf, str::FromStr, time::Duration};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn parse_choice<T: FromStr<Err = PlannerError>>(value: &str) -> Result<T, PlannerError> {
    value.parse()
}

fn parse_date(value: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
}

fn arg<T: Clone + Send + Sync + 'static>(matches: &ArgMatches, id: &str) -> anyhow::Result<T> {
    matches
        .get_one::<T>(id)
        .cloned()
        .with_context(|| format!("missing required argument --{id}"))
}

fn command() -> Command {
    Command::new("trip-planner")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Plan a trip with a hosted LLM, falling back to offline templates")
        .arg(
            Arg::new("kind")
                .help("What to generate: research, itinerary, or tips")
                .required(true)
                .index(1)
                .value_parser(parse_choice::<RequestKind>),
        )
        .arg(
            Arg::new("destination")
                .short('d')
                .long("destination")
                .value_name("PLACE")
                .help("Destination, e.g. \"Tokyo, Japan\"")
                .required(true),
        )
        .arg(
            Arg::new("start")
                .short('s')
                .long("start")
                .value_name("YYYY-MM-DD")
                .help("First day of the trip")
                .required(true)
                .value_parser(parse_date),
        )
        .arg(
            Arg::new("end")
                .short('e')
                .long("end")
                .value_name("YYYY-MM-DD")
                .help("Last day of the trip")
                .required(true)
                .value_parser(parse_date),
        )
        .arg(
            Arg::new("travelers")
                .short('n')
                .long("travelers")
                .value_name("COUNT")
                .help("Number of travelers (1-20)")
                .default_value("2")
                .value_parser(value_parser!(u32)),
        )
        .arg(
            Arg::new("style")
                .long("style")
                .value_name("STYLE")
                .help("Honeymoon, Adventure, Relaxation, Cultural, Luxury, Family, Solo, or Business")
                .default_value("honeymoon")
                .value_parser(parse_choice::<TravelStyle>),
        )
        .arg(
            Arg::new("budget")
                .short('b')
                .long("budget")
                .value_name("TIER")
                .help("budget, mid-range, premium, or luxury")
                .default_value("mid-range")
                .value_parser(parse_choice::<BudgetTier>),
        )
        .arg(
            Arg::new("accommodation")
                .short('a')
                .long("accommodation")
                .value_name("TYPE")
                .help("Preferred accommodation (repeatable); defaults to hotels")
                .action(ArgAction::Append)
                .value_parser(parse_choice::<Accommodation>),
        )
        .arg(
            Arg::new("interest")
                .short('i')
                .long("interest")
                .value_name("TAG")
                .help("Interest tag (repeatable); defaults to food & dining and nature")
                .action(ArgAction::Append)
                .value_parser(parse_choice::<Interest>),
        )
        .arg(
            Arg::new("transport")
                .long("transport")
                .value_name("MODE")
                .help("walking, public-transport, car-rental, or mixed")
                .default_value("walking")
                .value_parser(parse_choice::<Transportation>),
        )
        .arg(
            Arg::new("requirements")
                .short('r')
                .long("requirements")
                .value_name("TEXT")
                .help("Dietary restrictions, accessibility needs, or special occasions"),
        )
        .arg(
            Arg::new("research-notes")
                .long("research-notes")
                .value_name("FILE")
                .help("Earlier research output to feed into an itinerary request")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("api-key")
                .short('k')
                .long("api-key")
                .value_name("KEY")
                .help("HuggingFace API key (or set HF_API_KEY); omit for offline mode"),
        )
        .arg(
            Arg::new("model")
                .short('m')
                .long("model")
                .value_name("MODEL")
                .help("Model identifier (or set HF_MODEL)"),
        )
        .arg(
            Arg::new("max-tokens")
                .long("max-tokens")
                .value_name("COUNT")
                .help("Maximum output tokens (or set HF_MAX_TOKENS)")
                .value_parser(value_parser!(u32)),
        )
        .arg(
            Arg::new("temperature")
                .long("temperature")
                .value_name("VALUE")
                .help("Sampling temperature between 0.0 and 2.0 (or set HF_TEMPERATURE)")
                .value_parser(value_parser!(f32)),
        )
        .arg(
            Arg::new("base-url")
                .short('u')
                .long("base-url")
                .value_name("URL")
                .help("Chat-completion base URL (or set HF_BASE_URL)"),
        )
        .arg(
            Arg::new("timeout")
                .short('t')
                .long("timeout")
                .value_name("SECONDS")
                .help("Request timeout in seconds (or set HF_TIMEOUT_SECS)")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("export")
                .long("export")
                .value_name("DIR")
                .help("Write itinerary results to a text file in DIR")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print the result as JSON")
                .action(ArgAction::SetTrue),
        )
}

fn trip_from_matches(matches: &ArgMatches) -> anyhow::Result<TripRequest> {
    let mut builder = TripRequest::builder(
        arg::<String>(matches, "destination")?,
        arg::<NaiveDate>(matches, "start")?,
        arg::<NaiveDate>(matches, "end")?,
    )
    .with_travelers(arg(matches, "travelers")?)
    .with_style(arg(matches, "style")?)
    .with_budget(arg(matches, "budget")?)
    .with_transportation(arg(matches, "transport")?);

    if let Some(accommodation) = matches.get_many::<Accommodation>("accommodation") {
        builder = builder.with_accommodation(accommodation.copied());
    }
    if let Some(interests) = matches.get_many::<Interest>("interest") {
        builder = builder.with_interests(interests.copied());
    }
    if let Some(requirements) = matches.get_one::<String>("requirements") {
        builder = builder.with_special_requirements(requirements.as_str());
    }

    Ok(builder.build()?)
}

fn config_from_matches(matches: &ArgMatches) -> anyhow::Result<PlannerConfig> {
    let mut config = PlannerConfig::from_env()?;

    if let Some(base_url) = matches.get_one::<String>("base-url") {
        config.base_url = base_url.clone();
    }
    if let Some(model) = matches.get_one::<String>("model") {
        config.options.model = model.clone();
    }
    if let Some(max_tokens) = matches.get_one::<u32>("max-tokens") {
        config.options.max_tokens = *max_tokens;
    }
    if let Some(temperature) = matches.get_one::<f32>("temperature") {
        config.options.temperature = Some(*temperature);
    }
    if let Some(timeout) = matches.get_one::<u64>("timeout") {
        config.timeout = Duration::from_secs(*timeout);
    }

    config.validate()?;
    Ok(config)
}

/// CLI entry point for the trip-planner tool
pub async fn run() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = command().get_matches();

    let kind = arg::<RequestKind>(&matches, "kind")?;
    let trip = trip_from_matches(&matches)?;
    let config = config_from_matches(&matches)?;

    // The shell may source the key from the environment; the agent only ever sees the value
    let credential = matches
        .get_one::<String>("api-key")
        .cloned()
        .or_else(|| env::var("HF_API_KEY").ok())
        .and_then(Credential::new);

    if credential.is_none() {
        warn!("Operating in offline mode. Provide a HuggingFace API key for AI-powered responses.");
    }

    let research_notes = match matches.get_one::<PathBuf>("research-notes") {
        Some(path) => Some(
            std::fs::read_to_string(path)
                .with_context(|| format!("failed to read research notes from {}", path.display()))?,
        ),
        None => None,
    };

    info!(
        kind = %kind,
        destination = trip.destination(),
        days = trip.num_days(),
        model = %config.options.model,
        base_url = %config.base_url,
        "running planner"
    );

    let agent = Agent::from_config(&config);
    let result = agent
        .run_with_research(kind, &trip, credential.as_ref(), research_notes.as_deref())
        .await;

    if matches.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", result.render());
    }

    if let Some(dir) = matches.get_one::<PathBuf>("export") {
        if kind == RequestKind::Itinerary {
            let today = chrono::Local::now().date_naive();
            let path = export::write_itinerary(dir, &trip, &result.text, today)?;
            eprintln!("Itinerary saved to {}", path.display());
        } else {
            warn!(kind = %kind, "--export only applies to itinerary requests");
        }
    }

    Ok(())
}
