use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    /// Uniform integer in `lo..=hi`.
    fn range(&mut self, lo: u64, hi: u64) -> u64 {
        lo + self.next_u64() % (hi - lo + 1)
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.range(0, items.len() as u64 - 1) as usize]
    }
}

const HEADER: [&str; 10] = [
    "User ID",
    "Subscription Type",
    "Monthly Revenue",
    "Join Date",
    "Last Payment Date",
    "Country",
    "Age",
    "Gender",
    "Device",
    "Plan Duration",
];

fn main() -> Result<()> {
    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "data/subscribers.csv".to_string());
    let rows: u32 = 2500;
    let mut rng = SimpleRng::new(42);

    // The last entry has no map coordinates and is dropped by the loader.
    let countries = [
        "United States",
        "Canada",
        "United Kingdom",
        "Australia",
        "Germany",
        "France",
        "Brazil",
        "Mexico",
        "Spain",
        "Italy",
        "Atlantis",
    ];
    let subscriptions = ["Basic", "Standard", "Premium"];
    let devices = ["Smartphone", "Tablet", "Smart TV", "Laptop"];
    let genders = ["Male", "Female"];

    let epoch = NaiveDate::from_ymd_opt(2021, 1, 1).context("invalid start date")?;

    if let Some(dir) = std::path::Path::new(&output_path).parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
        }
    }
    let mut writer =
        csv::Writer::from_path(&output_path).with_context(|| format!("creating {output_path}"))?;
    writer.write_record(HEADER)?;

    for user_id in 1..=rows {
        let join = epoch + Duration::days(rng.range(0, 700) as i64);
        let last_payment = join + Duration::days(rng.range(30, 500) as i64);
        let revenue = rng.range(10, 15);
        let age = rng.range(26, 51);

        writer.write_record([
            user_id.to_string(),
            rng.pick(&subscriptions).to_string(),
            revenue.to_string(),
            join.format("%d-%m-%y").to_string(),
            last_payment.format("%d-%m-%y").to_string(),
            rng.pick(&countries).to_string(),
            age.to_string(),
            rng.pick(&genders).to_string(),
            rng.pick(&devices).to_string(),
            "1 Month".to_string(),
        ])?;
    }
    writer.flush()?;

    println!("Wrote {rows} subscribers to {output_path}");
    Ok(())
}
