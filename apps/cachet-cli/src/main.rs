use std::error::Error;
use std::process::ExitCode;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::EnvFilter;

use cachet::config::{parse_secret, CryptoConfig};
use cachet::{Cipher, SigningKeyPair};

#[derive(Debug, Parser)]
#[command(name = "cachet-cli", about = "Seal, open, sign, and verify text payloads")]
struct Cli {
    /// Secret key or signing seed; "base64:"-prefixed values are decoded.
    #[arg(long, env = "CACHET_KEY", global = true)]
    key: Option<String>,

    /// Cipher identifier for encryption commands.
    #[arg(
        long,
        env = "CACHET_CIPHER",
        global = true,
        default_value = "xchacha20-poly1305"
    )]
    cipher: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate a fresh encryption key for the chosen cipher.
    Keygen,
    /// Generate a signing keypair, seeded from --key when present.
    Keypair,
    /// Encrypt a string value into an encoded payload.
    Encrypt { value: String },
    /// Decrypt an encoded payload back into a string.
    Decrypt { payload: String },
    /// Sign a string value in combined mode.
    Sign { value: String },
    /// Verify a combined signed message and print the embedded value.
    Verify { signed: String },
    /// Sign a string value in detached mode.
    SignDetached { value: String },
    /// Verify a detached signature over a value.
    VerifyDetached { signature: String, value: String },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, Box<dyn Error>> {
    match &cli.command {
        Command::Keygen => {
            let cipher = Cipher::from_name(&cli.cipher)?;
            println!("base64:{}", STANDARD.encode(cipher.generate_key()));
        }
        Command::Keypair => {
            let keypair = match cli.key.as_deref() {
                Some(raw) => SigningKeyPair::from_seed(&parse_secret(raw)?)?,
                None => SigningKeyPair::generate(),
            };
            println!("seed:   base64:{}", STANDARD.encode(keypair.secret_key()));
            println!("public: {}", hex::encode(keypair.public_key()));
        }
        Command::Encrypt { value } => {
            let encrypter = config(&cli)?.encrypter()?;
            println!("{}", encrypter.encrypt_string(value)?);
        }
        Command::Decrypt { payload } => {
            let encrypter = config(&cli)?.encrypter()?;
            println!("{}", encrypter.decrypt_string(payload)?);
        }
        Command::Sign { value } => {
            let signer = config(&cli)?.signer()?;
            println!("{}", signer.sign_string(value));
        }
        Command::Verify { signed } => {
            let signer = config(&cli)?.signer()?;
            println!("{}", signer.verify_string(signed)?);
        }
        Command::SignDetached { value } => {
            let signer = config(&cli)?.signer()?;
            println!("{}", signer.sign_detached_string(value));
        }
        Command::VerifyDetached { signature, value } => {
            let signer = config(&cli)?.signer()?;
            if !signer.verify_detached_string(signature, value) {
                println!("invalid");
                return Ok(ExitCode::FAILURE);
            }
            println!("valid");
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn config(cli: &Cli) -> Result<CryptoConfig, Box<dyn Error>> {
    let key = cli
        .key
        .clone()
        .ok_or("a secret is required (--key or CACHET_KEY)")?;
    Ok(CryptoConfig {
        key,
        cipher: cli.cipher.clone(),
    })
}
