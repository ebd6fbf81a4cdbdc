#![allow(clippy::missing_docs_in_private_items)]
#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::indexing_slicing)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::pedantic)]
#![allow(warnings)]

use chaintbl::{ChainTable, KeyEqual, KeyHash, StdKeyEqual};
use plotters::prelude::*;
use rand::Rng;

// Bucket count held fixed (prime, below the rehash trigger for every run)
const TABLE_BUCKETS: usize = 1009;
// Load factors from 0.1 to 0.95 with 10 steps
const NUM_LOAD_FACTORS: usize = 10;
// Modulo classes of the degenerate hash; every key lands in one of these
const SKEW_CLASSES: u64 = 17;

// Hash strategies to compare
const STRATEGIES: [&str; 2] = ["Default Hash", "Degenerate Modulo Hash"];

// Average and worst chain length observed across the table's entries
fn chain_stats<H, E>(table: &ChainTable<u64, u64, H, E>) -> (f64, usize)
where
    H: KeyHash<u64>,
    E: KeyEqual<u64>,
{
    let mut total = 0usize;
    let mut worst = 0usize;
    let mut entries = 0usize;

    for (key, _) in table.iter() {
        let chain = table.count(key);
        total += chain;
        entries += 1;
        if chain > worst {
            worst = chain;
        }
    }

    if entries == 0 { (0.0, 0) } else { (total as f64 / entries as f64, worst) }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Generate load factors from 0.1 to 0.95
    let load_factors: Vec<f64> = (0..NUM_LOAD_FACTORS)
        .map(|i| 0.1 + (0.95 - 0.1) * (i as f64) / ((NUM_LOAD_FACTORS - 1) as f64))
        .collect();

    // Calculate number of keys for each load factor
    let num_keys: Vec<usize> =
        load_factors.iter().map(|&load| (TABLE_BUCKETS as f64 * load) as usize).collect();

    println!("Load factors: {:?}", load_factors);
    println!("Number of keys: {:?}", num_keys);

    // Results storage
    let mut average_chain: Vec<Vec<f64>> = vec![Vec::new(); STRATEGIES.len()];
    let mut worst_chain: Vec<Vec<usize>> = vec![Vec::new(); STRATEGIES.len()];

    // Generate random keys outside the loop to ensure fair comparison
    let mut rng = rand::rng();
    let max_keys_needed = *num_keys.iter().max().unwrap();
    let keys: Vec<u64> = (0..max_keys_needed).map(|_| rng.random_range(1..1_000_000)).collect();

    // Running experiments
    for &n_keys in &num_keys {
        println!("Filling {} of {} buckets", n_keys, TABLE_BUCKETS);

        let mut default_table: ChainTable<u64, u64> = ChainTable::with_buckets(TABLE_BUCKETS);
        let mut skewed_table =
            ChainTable::with_policies(TABLE_BUCKETS, |key: &u64| key % SKEW_CLASSES, StdKeyEqual);

        for &key in keys.iter().take(n_keys) {
            default_table.insert(key, key);
            skewed_table.insert(key, key);
        }

        let stats = [chain_stats(&default_table), chain_stats(&skewed_table)];
        for (strategy_idx, &(avg, worst)) in stats.iter().enumerate() {
            average_chain[strategy_idx].push(avg);
            worst_chain[strategy_idx].push(worst);

            println!(
                "  {}: Avg chain = {:.2}, Worst chain = {}, load factor = {:.2}",
                STRATEGIES[strategy_idx],
                avg,
                worst,
                default_table.load_factor()
            );
        }
    }

    // Plot configuration
    let font_family = "sans-serif";
    let colors = [
        RGBColor(50, 90, 220), // Bright blue
        RGBColor(220, 50, 50), // Bright red
    ];
    let line_width = 2;
    let marker_size = 4;
    let text_size = 16;
    let title_size = 35;

    // Custom x-axis labels showing the key counts
    let x_labels: Vec<String> = num_keys.iter().map(|&n| n.to_string()).collect();

    // Plot 1: Average chain length
    let root = BitMapBackend::new("average_chain_length.png", (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_avg = average_chain
        .iter()
        .flat_map(|v| v.iter())
        .fold(0.0, |max, &x| if x > max { x } else { max }) *
        1.1; // Add 10% margin

    let mut chart = ChartBuilder::on(&root)
        .caption("Chain Length by Hash Strategy", (font_family, title_size))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .build_cartesian_2d(0..(num_keys.len() - 1), 0.0..max_avg)?;

    chart
        .configure_mesh()
        .x_labels(num_keys.len() - 1)
        .x_label_formatter(&|x| {
            if *x < x_labels.len() { x_labels[*x].clone() } else { "".to_string() }
        })
        .x_desc("Number of Keys Inserted")
        .y_desc("Average Chain Length (entries)")
        .axis_desc_style((font_family, text_size))
        .draw()?;

    for (strategy_idx, &strategy) in STRATEGIES.iter().enumerate() {
        let color = &colors[strategy_idx % colors.len()];
        let line_style = ShapeStyle::from(color).stroke_width(line_width);

        chart
            .draw_series(LineSeries::new(
                (0..num_keys.len() - 1).map(|i| (i, average_chain[strategy_idx][i])),
                line_style,
            ))?
            .label(strategy)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));

        chart.draw_series((0..num_keys.len() - 1).map(|i| {
            Circle::new((i, average_chain[strategy_idx][i]), marker_size, color.filled())
        }))?;
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    // Plot 2: Worst chain length
    let root = BitMapBackend::new("worst_chain_length.png", (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_worst = worst_chain
        .iter()
        .flat_map(|v| v.iter())
        .fold(0, |max, &x| if x > max { x } else { max }) as f64 *
        1.1; // Add 10% margin

    let mut chart = ChartBuilder::on(&root)
        .caption("Worst-Case Chain Length", (font_family, title_size))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .build_cartesian_2d(0..(num_keys.len() - 1), 0.0..max_worst)?;

    chart
        .configure_mesh()
        .x_labels(num_keys.len() - 1)
        .x_label_formatter(&|x| {
            if *x < x_labels.len() { x_labels[*x].clone() } else { "".to_string() }
        })
        .x_desc("Number of Keys Inserted")
        .y_desc("Worst Chain Length (entries)")
        .axis_desc_style((font_family, text_size))
        .draw()?;

    for (strategy_idx, &strategy) in STRATEGIES.iter().enumerate() {
        let color = &colors[strategy_idx % colors.len()];
        let line_style = ShapeStyle::from(color).stroke_width(line_width);

        chart
            .draw_series(LineSeries::new(
                (0..num_keys.len() - 1).map(|i| (i, worst_chain[strategy_idx][i] as f64)),
                line_style,
            ))?
            .label(strategy)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));

        chart.draw_series((0..num_keys.len() - 1).map(|i| {
            Circle::new((i, worst_chain[strategy_idx][i] as f64), marker_size, color.filled())
        }))?;
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    println!("Generated plot images: average_chain_length.png, worst_chain_length.png");

    Ok(())
}
