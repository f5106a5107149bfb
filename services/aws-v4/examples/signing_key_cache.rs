//! Example demonstrating signing key caching and eviction logging

use sigkey_aws_v4::{build_scope, Config, Credential, SigningKeyCache, SigningKeyRequest};
use sigkey_core::{Context, OsEnv};

fn main() -> anyhow::Result<()> {
    // Initialize logger with debug level
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Debug)
        .init();

    // AWS_SIGNING_KEY_CACHE_SIZE and AWS_SIGNING_KEY_CACHE are honored if set.
    let ctx = Context::new().with_env(OsEnv);
    let config = Config::new().from_env(&ctx)?;
    let cache = SigningKeyCache::from_config(&config)?;
    println!("Using {cache:?}\n");

    let cred = Credential::new("AKIDEXAMPLE", "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY");
    let date = "20150830T123600Z";

    for service in ["iam", "s3", "iam"] {
        let req = SigningKeyRequest::from_credential(&cred, date, "us-east-1", service)?;
        let key = cache.resolve_sync(req)?;
        println!(
            "{}: {}",
            build_scope(date, "us-east-1", service),
            key.to_hex()
        );
    }

    println!("\nCached contexts, oldest first: {:?}", cache.keys());
    cache.empty_cache();
    Ok(())
}
