//! `zkauth` command-line tool.
//!
//! Generates identities, creates proofs and checks them offline, and
//! registers public keys in a JSON user directory. Every command prints a
//! single JSON document on stdout.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde_json::json;
use zkauth::logging::{init_tracing, DEFAULT_FILTER};
use zkauth::{AuthConfig, AuthService, JsonFileDirectory, RegistrationRequest};
use zkid::{FileSecretStore, ProofPayload, SecretStore};

#[derive(Parser, Debug)]
#[command(name = "zkauth", version, about = "Schnorr zero-knowledge identification")]
struct Args {
    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true, env = "ZKAUTH_LOG_JSON")]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a new identity
    Keygen {
        /// Write the secret key to this file instead of printing it
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Prove knowledge of a secret key for a context
    Prove {
        /// Secret key as hex
        #[arg(long, env = "ZKAUTH_SECRET", conflicts_with = "secret_file")]
        secret: Option<String>,

        /// File holding the secret key as hex
        #[arg(long)]
        secret_file: Option<PathBuf>,

        /// Context string the proof is bound to
        #[arg(long)]
        context: String,
    },

    /// Check a proof; exits with status 1 if it does not verify
    Verify {
        /// Public key as SEC1 hex
        #[arg(long)]
        public: String,

        /// Commitment R as SEC1 hex
        #[arg(long)]
        r: String,

        /// Response s as hex
        #[arg(long)]
        s: String,

        #[arg(long)]
        context: String,
    },

    /// Register a public key in the configured user directory
    Register {
        /// JSON configuration file
        #[arg(long, short)]
        config: Option<PathBuf>,

        #[arg(long)]
        username: String,

        #[arg(long)]
        public: String,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(DEFAULT_FILTER, args.log_json);

    match run(args.command) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            tracing::error!(error = %err, "command failed");
            eprintln!("error: {err}");
            ExitCode::from(2)
        }
    }
}

fn run(command: Command) -> Result<bool, Box<dyn std::error::Error>> {
    match command {
        Command::Keygen { out } => {
            let identity = zkid::generate_identity()?;
            let public_key = identity.public().to_hex();
            match out {
                Some(path) => {
                    FileSecretStore::new(&path).save(identity.secret())?;
                    print_json(&json!({
                        "publicKey": public_key,
                        "secretFile": path.display().to_string(),
                    }))?;
                }
                None => {
                    let secret = identity.secret().to_hex();
                    print_json(&json!({
                        "publicKey": public_key,
                        "secretKey": secret.as_str(),
                    }))?;
                }
            }
            Ok(true)
        }

        Command::Prove {
            secret,
            secret_file,
            context,
        } => {
            let secret = match (secret, secret_file) {
                (Some(hex), _) => zkid::SecretKey::from_hex(&hex)?,
                (None, Some(path)) => FileSecretStore::new(path)
                    .load()?
                    .ok_or("secret file is missing")?,
                (None, None) => return Err("one of --secret or --secret-file is required".into()),
            };
            let proof = zkid::create_proof(&secret, context.as_bytes())?;
            print_json(&json!({
                "publicKey": secret.public_key().to_hex(),
                "context": context,
                "proof": proof.to_payload(),
            }))?;
            Ok(true)
        }

        Command::Verify {
            public,
            r,
            s,
            context,
        } => {
            let payload = ProofPayload { r, s };
            let valid = zkid::verify_encoded(&public, &payload, context.as_bytes());
            print_json(&json!({ "valid": valid }))?;
            Ok(valid)
        }

        Command::Register {
            config,
            username,
            public,
        } => {
            let config = match config {
                Some(path) => AuthConfig::load(path)?,
                None => AuthConfig::default().apply_env()?,
            };
            let users_file = config
                .users_file()
                .ok_or("data_dir must be set to register users")?;
            let service = AuthService::new(JsonFileDirectory::open(users_file)?, config);
            let response = service.register(&RegistrationRequest {
                username,
                public_key: public,
            })?;
            print_json(&response)?;
            Ok(true)
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
