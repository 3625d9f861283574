use clap::{Parser, Subcommand};
use ethers_core::types::Address;

#[derive(Parser)]
#[clap(name = "Email Command Emitter", version = "0")]
#[command(disable_help_subcommand = true)]
pub struct CLI {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Authorizes a command by email and executes it on-chain")]
    Emit {
        #[arg(long)]
        contract: Address,
        #[arg(long)]
        account_code: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        owner: Address,
        /// String, Uint, Int, Decimals, EthAddr or their ordinal
        #[arg(long)]
        command_type: String,
        #[arg(long)]
        value: String,
        #[arg(long)]
        subject: String,
        #[arg(long)]
        body: String,
        #[arg(long, default_value_t = 120_000)]
        timeout_ms: u64,
    },
    #[command(about = "Prints a command template and its id")]
    Template {
        #[arg(long)]
        contract: Address,
        #[arg(long)]
        index: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_emit_arguments() {
        let cli = CLI::try_parse_from([
            "email-command",
            "emit",
            "--contract",
            "0x0000000000000000000000000000000000000001",
            "--account-code",
            "0x0c0de",
            "--email",
            "alice@example.com",
            "--owner",
            "0x0000000000000000000000000000000000000002",
            "--command-type",
            "Uint",
            "--value",
            "42",
            "--subject",
            "Emit",
            "--body",
            "Emit uint 42",
        ])
        .unwrap();
        match cli.command {
            Commands::Emit {
                command_type,
                timeout_ms,
                owner,
                ..
            } => {
                assert_eq!(command_type, "Uint");
                assert_eq!(timeout_ms, 120_000);
                assert_eq!(owner, Address::from_low_u64_be(2));
            }
            Commands::Template { .. } => panic!("parsed the wrong subcommand"),
        }
    }
}
