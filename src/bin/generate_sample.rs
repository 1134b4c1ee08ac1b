use std::sync::Arc;

use arrow::array::{ArrayRef, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

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

    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.below(items.len())]
    }
}

const GENRES: [&str; 8] = [
    "Drama", "Comedy", "Action", "Crime", "Animation", "Documentary", "Horror", "Romance",
];
const ADJECTIVES: [&str; 10] = [
    "Silent", "Broken", "Golden", "Last", "Hidden", "Crimson", "Endless", "Wild", "Lost", "Bright",
];
const NOUNS: [&str; 10] = [
    "Kingdom", "Harbor", "Signal", "Garden", "Empire", "Frontier", "Circus", "Winter", "Echo",
    "Machine",
];

/// `1234567` → `"1,234,567"`.
fn with_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// One row of raw text cells, deliberately as untidy as a scraped listing.
fn generate_row(i: usize, rng: &mut SimpleRng) -> [Option<String>; 7] {
    let title = format!("The {} {}", rng.pick(&ADJECTIVES), rng.pick(&NOUNS));
    let title = if i % 7 == 0 { format!("{title} {}", i / 7 + 2) } else { title };

    let start = 1960 + rng.below(63);
    let year = match rng.below(10) {
        0 => "TBD".to_string(),
        1 => format!("({start}– )"),
        2 => format!("({start}–{})", start + 1 + rng.below(4)),
        3 => format!("{}s", start / 10 * 10),
        _ => format!("({start})"),
    };

    let n_genres = 1 + rng.below(3);
    let genre = match rng.below(20) {
        0 => None,
        _ => Some(
            (0..n_genres)
                .map(|_| rng.pick(&GENRES))
                .collect::<Vec<_>>()
                .join(", "),
        ),
    };

    let rating = match rng.below(15) {
        0 => None,
        _ => Some(format!("{:.1}", 3.0 + rng.next_f64() * 6.5)),
    };
    let votes = match rng.below(12) {
        0 => None,
        _ => Some(with_thousands((rng.next_f64().powi(3) * 2_000_000.0) as u64)),
    };
    let duration = match rng.below(8) {
        0 => None,
        _ => Some(format!("{} min", 20 + rng.below(160))),
    };
    let description = Some(format!(
        "A {} story set around a {} that nobody expected.",
        rng.pick(&["quiet", "tense", "sprawling", "playful", "bleak"]),
        rng.pick(&NOUNS).to_lowercase()
    ));

    [Some(title), Some(year), genre, rating, votes, duration, description]
}

const COLUMNS: [&str; 7] = [
    "title",
    "year",
    "genre",
    "rating",
    "votes",
    "duration",
    "description",
];

fn main() {
    let mut rng = SimpleRng::new(42);
    let rows: Vec<[Option<String>; 7]> = (0..500).map(|i| generate_row(i, &mut rng)).collect();

    // Write CSV
    let csv_path = "n_movies.csv";
    let mut writer = csv::Writer::from_path(csv_path).expect("Failed to create CSV file");
    writer.write_record(COLUMNS).expect("Failed to write header");
    for row in &rows {
        writer
            .write_record(row.iter().map(|c| c.as_deref().unwrap_or("")))
            .expect("Failed to write row");
    }
    writer.flush().expect("Failed to flush CSV");

    // Build Arrow arrays, one nullable string column per field
    let schema = Arc::new(Schema::new(
        COLUMNS
            .iter()
            .map(|name| Field::new(*name, DataType::Utf8, true))
            .collect::<Vec<_>>(),
    ));
    let columns: Vec<ArrayRef> = (0..COLUMNS.len())
        .map(|col| {
            let values: Vec<Option<&str>> = rows.iter().map(|r| r[col].as_deref()).collect();
            Arc::new(StringArray::from(values)) as ArrayRef
        })
        .collect();
    let batch =
        RecordBatch::try_new(schema.clone(), columns).expect("Failed to create RecordBatch");

    // Write Parquet
    let parquet_path = "n_movies.parquet";
    let file = std::fs::File::create(parquet_path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");

    println!("Wrote {} titles to {csv_path} and {parquet_path}", rows.len());
}
