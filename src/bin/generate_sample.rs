use std::path::Path;

use anyhow::{Context, Result};

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

    fn gen_range(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }

    fn pick<'a>(&mut self, options: &'a [&'a str]) -> &'a str {
        options[self.gen_range(options.len())]
    }
}

const SUBJECTS: &[&str] = &[
    "Taxi Trips", "Citi Bike", "Air Quality", "Stock Prices", "Song Lyrics",
    "Fraud Detection", "Customer Churn", "House Prices", "Flight Delays",
    "Energy Consumption",
];

const APPROACHES: &[&str] = &[
    "Streaming Pipeline", "Batch Pipeline", "Dashboard", "Prediction Service",
    "Classifier", "Recommendation Engine", "Data Warehouse", "Monitoring Stack",
];

const DEPLOYMENTS: &[&str] = &["batch", "web service", "streaming", "mobile", "none"];

fn project_title(rng: &mut SimpleRng) -> String {
    format!("{} {}", rng.pick(SUBJECTS), rng.pick(APPROACHES))
}

fn write_dataset(root: &Path, course: &str, year: &str, rng: &mut SimpleRng) -> Result<()> {
    let dir = root.join(course).join(year);
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("creating {}", dir.display()))?;
    let path = dir.join("data.csv");

    let mut writer = csv::Writer::from_path(&path)
        .with_context(|| format!("creating {}", path.display()))?;
    writer.write_record(["project_title", "project_url", "Deployment Type", "stars", "score"])?;

    let n_rows = 40 + rng.gen_range(40);
    for i in 0..n_rows {
        let title = project_title(rng);
        let slug: String = title
            .to_lowercase()
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { '-' })
            .collect();
        let url = format!("https://github.com/{course}-{year}/{slug}-{i}");
        // Some submissions leave the deployment field blank.
        let deployment = if rng.gen_range(10) == 0 {
            ""
        } else {
            rng.pick(DEPLOYMENTS)
        };
        let stars = rng.gen_range(120).to_string();
        let score = format!("{:.1}", 60.0 + (rng.gen_range(400) as f64) / 10.0);

        writer.write_record([
            title.as_str(),
            url.as_str(),
            deployment,
            stars.as_str(),
            score.as_str(),
        ])?;
    }
    writer.flush()?;

    println!("Wrote {} rows to {}", n_rows, path.display());
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let root = Path::new("./Data");

    for course in ["dezoomcamp", "mlopszoomcamp", "mlzoomcamp"] {
        for year in ["2021", "2022", "2023"] {
            write_dataset(root, course, year, &mut rng)?;
        }
    }
    Ok(())
}
