//! Example: Retrying an unreliable call
//!
//! This example demonstrates:
//! 1. Simple retry with a fixed delay
//! 2. Aborting early on an unrecoverable error
//! 3. The wall-clock cost of the delay
//!
//! Run with:
//! ```bash
//! RUST_LOG=reattempt=debug cargo run -p reattempt --example retry_example
//! ```

use reattempt::prelude::*;
use std::io;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// A simulated API that fails the first few times
struct UnreliableApi {
    attempts: AtomicU32,
    fail_count: u32,
}

impl UnreliableApi {
    fn new(fail_count: u32) -> Self {
        Self {
            attempts: AtomicU32::new(0),
            fail_count,
        }
    }

    async fn call(&self) -> Result<String, io::Error> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);

        if attempt < self.fail_count {
            println!("  Attempt {}: FAILED (transient error)", attempt + 1);
            Err(io::Error::other(format!(
                "Transient error on attempt {}",
                attempt + 1
            )))
        } else {
            println!("  Attempt {}: SUCCESS", attempt + 1);
            Ok("API response data".to_string())
        }
    }

    fn total_attempts(&self) -> u32 {
        self.attempts.load(Ordering::SeqCst)
    }
}

/// Example 1: Simple retry with a fixed delay
async fn example_simple_retry() -> Result<(), Box<dyn std::error::Error>> {
    println!("\n=== Example 1: Simple Retry ===\n");

    let config = RetryConfig::builder().attempts(3).delay_ms(100).build();
    let api = UnreliableApi::new(2);

    println!("Calling unreliable API (will fail 2 times before succeeding)...");
    let start = Instant::now();

    let result = retry_with(
        || {
            let api = &api;
            async move { Ok::<_, Error<io::Error>>(api.call().await?) }
        },
        config,
    )
    .await?;

    println!("\nResult: {}", result);
    println!("Total attempts: {}", api.total_attempts());
    println!("Total time: {:?} (expected ~200ms)", start.elapsed());

    Ok(())
}

/// Example 2: Abort on an error that retrying cannot fix
async fn example_abort() -> Result<(), Box<dyn std::error::Error>> {
    println!("\n=== Example 2: Abort on Permission Errors ===\n");

    let retrier = Retrier::new(RetryConfig::builder().attempts(5).delay_ms(10).build());
    let attempts = AtomicU32::new(0);

    let result = retrier
        .run(|| {
            let attempts = &attempts;
            async move {
                let current = attempts.fetch_add(1, Ordering::SeqCst) + 1;
                let err = if current < 2 {
                    io::Error::other("network timeout")
                } else {
                    io::Error::new(io::ErrorKind::PermissionDenied, "auth failed")
                };

                println!("  Attempt {}: {}", current, err);
                if err.kind() == io::ErrorKind::PermissionDenied {
                    return Err::<(), _>(Error::abort(err));
                }
                Err(Error::Failed(err))
            }
        })
        .await;

    let err = result.expect_err("operation never succeeds");
    println!("\nFinal error: {} ({})", err, err.name());
    println!(
        "Total attempts: {} of 5 allowed",
        attempts.load(Ordering::SeqCst)
    );

    Ok(())
}

/// Example 3: Delay cost when every attempt fails
async fn example_delay_cost() -> Result<(), Box<dyn std::error::Error>> {
    println!("\n=== Example 3: Delay Cost ===\n");

    for delay_ms in [0, 50, 100] {
        let config = RetryConfig::builder().delay_ms(delay_ms).build();
        let start = Instant::now();

        let _ = retry_with(
            || async { Err::<(), _>(Error::Failed(io::Error::other("always"))) },
            config,
        )
        .await;

        println!(
            "  delay {:>3}ms x {} attempts: {:?} (at least {}ms)",
            delay_ms,
            config.attempts(),
            start.elapsed(),
            delay_ms * u64::from(config.attempts() - 1)
        );
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("==============================================");
    println!("   reattempt: Retry Examples");
    println!("==============================================");

    example_simple_retry().await?;
    example_abort().await?;
    example_delay_cost().await?;

    println!("\n==============================================");
    println!("   All examples completed successfully!");
    println!("==============================================\n");

    Ok(())
}
