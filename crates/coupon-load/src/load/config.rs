use anyhow::bail;
use clap::Parser;
use coupon_engine::{DEFAULT_CODE_LENGTH, code_capacity};

/// Runtime configuration for the `coupon-load` binary.
///
/// All values are parsed from CLI arguments or environment variables (a
/// `.env` file is honoured), with defaults that exercise quota exhaustion.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "coupon-load",
    version,
    about = "Concurrent issuance load against an in-memory coupon campaign"
)]
pub struct CliArgs {
    /// Name of the campaign created for the run.
    ///
    /// Environment variable: `CAMPAIGN_NAME`
    #[arg(long, env = "CAMPAIGN_NAME", default_value_t = String::from("load-test"))]
    pub campaign_name: String,

    /// Coupon quota of the campaign.
    ///
    /// Environment variable: `TOTAL_COUPONS`
    #[arg(long, env = "TOTAL_COUPONS", default_value_t = 1_000)]
    pub total: u64,

    /// Issuance attempts across all workers.
    ///
    /// Environment variable: `ATTEMPTS`
    #[arg(long, env = "ATTEMPTS", default_value_t = 5_000)]
    pub attempts: usize,

    /// Number of concurrent worker tasks.
    ///
    /// Environment variable: `NUM_WORKERS`
    #[arg(long, env = "NUM_WORKERS", default_value_t = num_cpus::get())]
    pub workers: usize,

    /// Campaign start time relative to now, in seconds. Negative values
    /// start the campaign in the past; positive values make every attempt
    /// hit the start-time gate.
    ///
    /// Environment variable: `START_OFFSET_SECS`
    #[arg(
        long,
        env = "START_OFFSET_SECS",
        default_value_t = -1,
        allow_hyphen_values = true
    )]
    pub start_offset_secs: i64,

    /// Symbols per coupon code. Zero selects the default.
    ///
    /// Environment variable: `CODE_LENGTH`
    #[arg(long, env = "CODE_LENGTH", default_value_t = DEFAULT_CODE_LENGTH)]
    pub code_length: usize,
}

#[derive(Debug, Clone)]
pub struct LoadConfig {
    pub campaign_name: String,
    pub total: u64,
    pub attempts: usize,
    pub workers: usize,
    pub start_offset_secs: i64,
    pub code_length: usize,
}

impl LoadConfig {
    /// Whether the campaign is open for the whole run.
    pub fn starts_in_past(&self) -> bool {
        self.start_offset_secs <= 0
    }

    /// Coupons a correct engine hands out during the run.
    pub fn expected_issued(&self) -> u64 {
        if self.starts_in_past() {
            self.total.min(self.attempts as u64)
        } else {
            0
        }
    }
}

impl TryFrom<CliArgs> for LoadConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        if args.campaign_name.is_empty() {
            bail!("CAMPAIGN_NAME must not be empty");
        }

        if args.total == 0 {
            bail!("TOTAL_COUPONS must be greater than 0");
        }

        if args.attempts == 0 {
            bail!("ATTEMPTS must be greater than 0");
        }

        if args.workers == 0 {
            bail!("NUM_WORKERS must be greater than 0");
        }

        // Zero selects the engine default.
        let code_length = if args.code_length == 0 {
            DEFAULT_CODE_LENGTH
        } else {
            args.code_length
        };

        // `None` means the code space does not fit in a u128.
        if let Some(capacity) = code_capacity(code_length) {
            let wanted = args.total.min(args.attempts as u64) as u128;
            if capacity < wanted {
                bail!(
                    "CODE_LENGTH ({}) allows only {} distinct codes, fewer than the {} coupons this run can issue",
                    code_length,
                    capacity,
                    wanted
                );
            }
        }

        Ok(Self {
            campaign_name: args.campaign_name,
            total: args.total,
            attempts: args.attempts,
            workers: args.workers,
            start_offset_secs: args.start_offset_secs,
            code_length,
        })
    }
}
