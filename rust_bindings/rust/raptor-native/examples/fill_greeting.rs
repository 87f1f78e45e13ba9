use raptor_native::{fill_greeting, fill_greeting_exact, greeting_length, ShimError};
use std::process;

fn print_usage() {
    eprintln!("Usage: fill_greeting [CAPACITY]...");
    eprintln!();
    eprintln!("Copies the greeting into buffers of each CAPACITY (default: 0 5 14 15 20)");
    eprintln!("and shows the truncating and exact results side by side.");
    eprintln!();
    eprintln!("Set RUST_LOG=raptor_native=debug to see Greeter construct/drop events.");
}

fn render(buffer: &[u8], written: usize) -> String {
    String::from_utf8_lossy(&buffer[..written]).into_owned()
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "raptor_native=info".into()),
        )
        .init();

    let mut capacities = Vec::new();
    for arg in std::env::args().skip(1) {
        if arg == "--help" || arg == "-h" {
            print_usage();
            process::exit(0);
        }
        match arg.parse::<usize>() {
            Ok(capacity) => capacities.push(capacity),
            Err(_) => {
                eprintln!("Error: capacity must be a non-negative integer, got {}", arg);
                print_usage();
                process::exit(1);
            }
        }
    }
    if capacities.is_empty() {
        capacities = vec![0, 5, 14, 15, 20];
    }

    println!("raptor-native v{}", raptor_native::version());
    println!("Greeting length: {} bytes", greeting_length());
    println!();

    for capacity in capacities {
        let mut buffer = vec![0u8; capacity];

        let truncated = match fill_greeting(&mut buffer) {
            Ok(written) => format!("{:?}", render(&buffer, written)),
            Err(e) => format!("error: {}", e),
        };

        let exact = match fill_greeting_exact(&mut buffer) {
            Ok(written) => format!("{:?}", render(&buffer, written)),
            Err(ShimError::CapacityExceeded { required, .. }) => {
                format!("needs {} bytes", required)
            }
            Err(e) => format!("error: {}", e),
        };

        println!("capacity {:>3}: truncating {:<20} exact {}", capacity, truncated, exact);
    }
}
