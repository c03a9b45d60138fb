use pathweave::RuleTemplate;
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Generate n random production bodies to use in the benchmark
pub fn generate_random_templates(n: usize, max_depth: usize) -> Vec<RuleTemplate<'static>> {
    let mut rng = StdRng::seed_from_u64(42); // Fixed seed for reproducibility
    (0..n)
        .map(|_| random_template(&mut rng, max_depth))
        .collect()
}

fn random_template(rng: &mut StdRng, depth: usize) -> RuleTemplate<'static> {
    if depth == 0 || rng.random_bool(0.3) {
        return RuleTemplate::from(random_action(rng));
    }

    let len = rng.random_range(1..5);
    let children = (0..len)
        .map(|_| random_template(rng, depth - 1))
        .collect();

    match rng.random_range(0..5) {
        0 => RuleTemplate::Sequence(children),
        1 => RuleTemplate::Optional(children),
        2 => RuleTemplate::Repeat(children),
        3 => RuleTemplate::OneOf(children),
        _ => RuleTemplate::Switch {
            feature: if rng.random_bool(0.5) { "on" } else { "off" }.into(),
            body: children,
        },
    }
}

/// Generate a random upper-case action name
fn random_action(rng: &mut StdRng) -> String {
    let charset = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    let len = rng.random_range(3..=8);

    (0..len)
        .map(|_| {
            let idx = rng.random_range(0..charset.len());
            charset.chars().nth(idx).unwrap()
        })
        .collect()
}

// Print binary size information - can be used from individual benchmarks
pub fn print_binary_size() {
    let binary_path = std::env::current_exe().unwrap();
    let metadata = std::fs::metadata(binary_path.clone()).unwrap();
    let size_bytes = metadata.len();
    let size_kb = size_bytes as f64 / 1024.0;
    let size_mb = size_kb / 1024.0;

    println!(
        "Binary size: {:.2} MB ({:.2} KB, {} bytes)",
        size_mb, size_kb, size_bytes
    );
    println!("Binary path: {}", binary_path.display());
}
