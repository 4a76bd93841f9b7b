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

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }

    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

const OUTPUT_PATH: &str = "car_cleaned.csv";

fn main() {
    let mut rng = SimpleRng::new(42);

    // (company, [(model, base price, base power, seats)])
    let catalog: &[(&str, &[(&str, f64, f64, i64)])] = &[
        ("Astra Motors", &[
            ("Pulse", 649_000.0, 82.0, 5),
            ("Pulse Max", 815_000.0, 98.0, 5),
            ("Terrane", 1_280_000.0, 138.0, 7),
        ]),
        ("Borealis", &[
            ("Drift", 720_000.0, 89.0, 5),
            ("Glacier", 1_950_000.0, 182.0, 7),
        ]),
        ("Cinder Auto", &[
            ("Ember", 540_000.0, 68.0, 4),
            ("Forge", 990_000.0, 118.0, 5),
            ("Kiln", 1_420_000.0, 150.0, 5),
        ]),
        ("Dynamo", &[
            ("Volt S", 1_150_000.0, 130.0, 5),
            ("Volt XL", 1_680_000.0, 204.0, 5),
        ]),
        ("Everglade", &[
            ("Marsh", 830_000.0, 95.0, 5),
            ("Lagoon", 1_060_000.0, 110.0, 7),
            ("Delta", 2_350_000.0, 245.0, 5),
        ]),
    ];

    let variants: &[(&str, f64)] = &[("Base", 1.0), ("Mid", 1.14), ("Top", 1.32)];
    let fuels = ["Petrol", "Diesel", "CNG", "Electric"];
    let drivetrains = ["FWD", "RWD", "AWD"];

    let mut writer = csv::Writer::from_path(OUTPUT_PATH).expect("Failed to create output file");
    writer
        .write_record([
            "Company",
            "Model",
            "Variant",
            "Fuel_Type",
            "Drivetrain",
            "Seating_Capacity",
            "Ex-Showroom_Price",
            "Power_Value",
            "Torque_Value",
        ])
        .expect("Failed to write header");

    let mut rows = 0u32;
    for (company, models) in catalog {
        for &(model, base_price, base_power, seats) in *models {
            for &(variant, uplift) in variants {
                let fuel = fuels[rng.pick(fuels.len())];
                let drivetrain = drivetrains[rng.pick(drivetrains.len())];

                let price = base_price * uplift * (1.0 + rng.gauss(0.0, 0.03));
                let power = base_power * uplift.sqrt() + rng.gauss(0.0, 3.0);
                let torque = power * (1.6 + rng.next_f64() * 0.6);

                // A few cells are left empty so the missing-data summary and
                // the aggregate exclusion paths have something to chew on.
                let variant_cell = if rng.chance(0.02) { String::new() } else { variant.to_string() };
                let seats_cell = if rng.chance(0.02) { String::new() } else { seats.to_string() };
                let price_cell = if rng.chance(0.03) {
                    String::new()
                } else {
                    format!("{:.0}", price)
                };
                let power_cell = if rng.chance(0.04) {
                    String::new()
                } else {
                    format!("{:.1}", power)
                };
                let torque_cell = if rng.chance(0.05) {
                    String::new()
                } else {
                    format!("{:.1}", torque)
                };

                writer
                    .write_record([
                        company.to_string(),
                        model.to_string(),
                        variant_cell,
                        fuel.to_string(),
                        drivetrain.to_string(),
                        seats_cell,
                        price_cell,
                        power_cell,
                        torque_cell,
                    ])
                    .expect("Failed to write record");
                rows += 1;
            }
        }
    }

    writer.flush().expect("Failed to flush output");
    println!("Wrote {rows} cars to {OUTPUT_PATH}");
}
