use attributes::{AttributeMap, AttributeValue};
use tracing::{info, span, Level};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

struct Args {
    pub input: String,
    pub set: Vec<String>,
    pub append: Vec<String>,
    pub prepend: Vec<String>,
    pub delete: Vec<String>,
    pub strict: bool,
    pub list: bool,
    pub trace: bool,
}

fn main() {
    let args = parse_args().expect("Could not parse arguments");
    if args.trace {
        tracing_subscriber::fmt::fmt()
            .with_span_events(FmtSpan::ACTIVE)
            .with_max_level(Level::DEBUG)
            .with_env_filter(EnvFilter::from_default_env())
            .finish()
            .init();
        info!("Logger initialized");
    }

    let attrs = match load(&args) {
        Ok(attrs) => attrs,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };
    if args.list {
        for (name, value) in &attrs {
            println!("{}\t{}", name, value);
        }
    } else {
        println!("{}", attrs);
    }
}

fn parse_args() -> Result<Args, pico_args::Error> {
    let mut pargs = pico_args::Arguments::from_env();
    // Options first, so the positional input is whatever remains
    let args = Args {
        set: pargs.values_from_str("--set")?,
        append: pargs.values_from_str("--append")?,
        prepend: pargs.values_from_str("--prepend")?,
        delete: pargs.values_from_str("--delete")?,
        strict: pargs.contains("--strict"),
        list: pargs.contains("--list"),
        trace: pargs.contains(["--trace", "-t"]),
        input: pargs.opt_free_from_str()?.unwrap_or_default(),
    };
    Ok(args)
}

fn load(args: &Args) -> attributes::Result<AttributeMap> {
    let mut attrs = if args.strict {
        AttributeMap::try_from_str(&args.input)?
    } else {
        AttributeMap::make(args.input.as_str())
    };
    let span = span!(Level::DEBUG, "Applying edits");
    let _enter = span.enter();
    apply_edits(&mut attrs, args);
    Ok(attrs)
}

/// Split `name=value`. A bare `name` has no value.
fn split_edit(edit: &str) -> (&str, Option<&str>) {
    match edit.split_once('=') {
        Some((name, value)) => (name, Some(value)),
        None => (edit, None),
    }
}

fn apply_edits(attrs: &mut AttributeMap, args: &Args) {
    for edit in &args.set {
        match split_edit(edit) {
            (name, Some(value)) => attrs.set(name, value),
            (name, None) => attrs.set(name, AttributeValue::Flag(true)),
        };
    }
    for edit in &args.append {
        let (name, value) = split_edit(edit);
        attrs.append(name, value.unwrap_or_default());
    }
    for edit in &args.prepend {
        let (name, value) = split_edit(edit);
        attrs.prepend(name, value.unwrap_or_default());
    }
    for name in &args.delete {
        attrs.delete(name);
    }
}

#[cfg(test)]
fn args(input: &str) -> Args {
    Args {
        input: input.to_string(),
        set: vec![],
        append: vec![],
        prepend: vec![],
        delete: vec![],
        strict: false,
        list: false,
        trace: false,
    }
}

#[cfg(test)]
#[test]
fn test_split_edit() {
    assert_eq!(split_edit("class=btn"), ("class", Some("btn")));
    assert_eq!(split_edit("href=/?a=b"), ("href", Some("/?a=b")));
    assert_eq!(split_edit("disabled"), ("disabled", None));
}

#[cfg(test)]
#[test]
fn test_load_with_edits() {
    let mut a = args(r#"id="app" class="btn" hidden"#);
    a.set = vec!["disabled".to_string(), "id=main".to_string()];
    a.append = vec!["class= primary".to_string()];
    a.prepend = vec!["title=Home".to_string()];
    a.delete = vec!["hidden".to_string()];
    let attrs = load(&a).unwrap();
    assert_eq!(
        attrs.to_string(),
        r#"id="main" class="btn primary" disabled title="Home""#
    );
}

#[cfg(test)]
#[test]
fn test_load_strict() {
    let mut a = args(r#"id="app" hidden"#);
    assert!(load(&a).is_ok());
    a.strict = true;
    assert!(load(&a).is_err());
}
