//! Writes `startup_funding.csv`, a deterministic sample dataset for the
//! dashboard. Includes a few exact duplicate rows and some missing or
//! malformed emails so the cleaning stage is exercised.

/// Minimal deterministic PRNG (SplitMix64).
struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        SimpleRng { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E3779B97F4A7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
        z ^ (z >> 31)
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }

    fn range(&mut self, low: i64, high: i64) -> i64 {
        low + (self.next_u64() % (high - low + 1) as u64) as i64
    }
}

fn main() {
    let mut rng = SimpleRng::new(7);

    let industries = ["Fintech", "HealthTech", "EdTech", "E-Commerce", "AgriTech", "SaaS"];
    let stages = ["Seed", "Series A", "Series B", "Series C"];
    let cities = ["Bangalore", "Mumbai", "Delhi", "Hyderabad", "Pune", "Chennai"];
    let email_domains = ["ventures.in", "startmail.com", "founders.io", "capital.co"];

    let output_path = "startup_funding.csv";
    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");
    writer
        .write_record([
            "Industry",
            "Funding_Stage",
            "Year",
            "Funding_Amount",
            "Contact_Email",
            "City",
        ])
        .expect("Failed to write header");

    let mut rows: Vec<[String; 6]> = Vec::new();

    for i in 0..300 {
        let industry = rng.pick(&industries);
        let stage = rng.pick(&stages);
        let year = rng.range(2015, 2025);

        // Later stages raise more; amounts span roughly 0.2M to 120M.
        let stage_scale = match stage {
            "Seed" => 1.0,
            "Series A" => 6.0,
            "Series B" => 20.0,
            _ => 55.0,
        };
        let amount = (0.2 + rng.next_f64() * 2.0) * stage_scale * 1_000_000.0;

        // Roughly one in ten rows has no email; a few are malformed.
        let email = match rng.next_u64() % 10 {
            0 => String::new(),
            1 => format!("contact-{i}-no-at-sign"),
            _ => format!("founder{i}@{}", rng.pick(&email_domains)),
        };

        rows.push([
            industry.to_string(),
            stage.to_string(),
            year.to_string(),
            format!("{amount:.0}"),
            email,
            rng.pick(&cities).to_string(),
        ]);
    }

    // Duplicate a handful of rows verbatim so deduplication has work to do.
    for i in [3usize, 42, 117, 200, 256] {
        let dup = rows[i].clone();
        rows.push(dup);
    }

    let total = rows.len();
    for row in rows {
        writer.write_record(&row).expect("Failed to write row");
    }
    writer.flush().expect("Failed to flush CSV");

    println!("Wrote {total} funding rows (5 duplicates) to {output_path}");
}
