use clap::{
    Arg, ArgAction, ArgGroup, ColorChoice, Command,
    builder::styling::{AnsiColor, Effects, Styles},
};

/// Pure clap command definitions with zero business logic
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    Command::new(env!("CARGO_PKG_NAME"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new("host")
                .default_value("localhost")
                .env("COUCHDB_HOST")
                .help("CouchDB host name or IP address")
                .long("host")
                .short('H')
                .value_name("HOST"),
        )
        .arg(
            Arg::new("port")
                .default_value("5984")
                .env("COUCHDB_PORT")
                .help("CouchDB HTTP port")
                .long("port")
                .short('P')
                .value_parser(clap::value_parser!(u16).range(1..)),
        )
        .arg(
            Arg::new("user")
                .env("COUCHDB_USER")
                .help("user for HTTP basic authentication")
                .long("user")
                .short('u')
                .value_name("USER"),
        )
        .arg(
            Arg::new("password")
                .env("COUCHDB_PASSWORD")
                .help("password for HTTP basic authentication")
                .hide_env_values(true)
                .long("password")
                .short('p')
                .value_name("PASSWORD")
                .requires("user"),
        )
        .arg(
            Arg::new("database")
                .help("database to assert exists")
                .long("database")
                .long_help(
                    "Database to assert exists.\n\n\
                    Allowed characters: lowercase letters (a-z), digits (0-9) \
                    and any of _ $ ( ) + - /",
                )
                .short('d')
                .value_name("NAME"),
        )
        .arg(
            Arg::new("list")
                .action(ArgAction::SetTrue)
                .help("list databases and exit (always UNKNOWN)")
                .long("list")
                .short('l'),
        )
        .group(
            ArgGroup::new("mode")
                .args(["database", "list"])
                .required(true),
        )
        .arg(
            Arg::new("timeout")
                .default_value("10")
                .env("COUCHDB_TIMEOUT")
                .help("seconds to wait for CouchDB before giving up")
                .long("timeout")
                .short('t')
                .value_parser(clap::value_parser!(u64).range(1..=3600)),
        )
        .arg(
            Arg::new("tls-mode")
                .env("COUCHDB_TLS_MODE")
                .help("TLS mode: disable, require, verify-ca, verify-full")
                .long("tls-mode")
                .long_help(
                    "TLS mode for the CouchDB HTTP API:\n\n\
                    - disable: plain HTTP (default)\n\
                    - require: HTTPS, no certificate verification\n\
                    - verify-ca: HTTPS, verify the certificate chain against the CA\n\
                    - verify-full: HTTPS, verify the certificate chain and hostname\n\n\
                    Without --tls-ca the bundled Mozilla root certificates are used.",
                )
                .value_name("MODE")
                .value_parser(["disable", "require", "verify-ca", "verify-full"])
                .ignore_case(true),
        )
        .arg(
            Arg::new("tls-ca")
                .env("COUCHDB_TLS_CA")
                .help("Path to CA certificate file for TLS verification")
                .long("tls-ca")
                .value_name("PATH")
                .requires("tls-mode"),
        )
        .arg(
            Arg::new("tls-cert")
                .env("COUCHDB_TLS_CERT")
                .help("Path to client certificate file for TLS client authentication")
                .long("tls-cert")
                .long_help(
                    "Path to client certificate file for mutual TLS authentication.\n\
                    Must be used together with --tls-key.",
                )
                .value_name("PATH")
                .requires("tls-key"),
        )
        .arg(
            Arg::new("tls-key")
                .env("COUCHDB_TLS_KEY")
                .help("Path to client private key file for TLS client authentication")
                .long("tls-key")
                .long_help(
                    "Path to client private key file for mutual TLS authentication.\n\
                    Must be used together with --tls-cert.",
                )
                .value_name("PATH")
                .requires("tls-cert"),
        )
        .arg(
            Arg::new("verbose")
                .action(ArgAction::Count)
                .help("log to stderr, repeat for more detail (-v info, -vv debug, -vvv trace)")
                .long("verbose")
                .short('v'),
        )
}
