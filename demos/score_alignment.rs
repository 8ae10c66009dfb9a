use goscore::similarity::Builtins;
use goscore::{Inputs, Options, Pipeline};

const USAGE: &str = "Usage: ./score_alignment <alignment.sif> <go_species1> <go_species2> <mapping_species1> <mapping_species2> [jaccard|cosine]";

fn main() {
    simple_logger::init_with_env().unwrap();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 5 {
        panic!("{USAGE}");
    }

    let metric: Builtins = args.get(5).map_or("jaccard", String::as_str).parse().unwrap();

    let inputs = Inputs::new(&args[0], &args[1], &args[2], &args[3], &args[4]);
    let output = Pipeline::new(Options::default().similarity(metric))
        .run(&inputs)
        .unwrap();

    let result = output.result();
    let summary = result.summary();

    println!("Metric:             {}", result.metric());
    println!("Total pairs:        {}", result.total_pairs());
    println!("Scored pairs:       {}", result.scored_pairs());
    println!("Unmappable (first): {}", result.unmappable_first());
    println!("Unmappable (second): {}", result.unmappable_second());
    println!("Total score:        {:.4}", result.total_score());
    println!("Mean score:         {:.4}", summary.mean());
    println!("Median score:       {:.4}", summary.median());
    println!("Std deviation:      {:.4}", summary.std_dev());
    println!("Min / Max:          {:.4} / {:.4}", summary.min(), summary.max());
    println!("Coverage:           {:.2}%", summary.coverage() * 100.0);
    println!("Quality:            {:?}", result.quality());
    println!("Coverage grade:     {:?}", result.coverage_grade());

    let comparison = output.comparison();
    println!(
        "\nGO terms: {} (first) / {} (second), {} shared, overlap {:.4}",
        comparison.first_terms(),
        comparison.second_terms(),
        comparison.common_terms(),
        comparison.term_overlap()
    );

    for (name, stats) in [
        ("first", output.annotation_stats_first()),
        ("second", output.annotation_stats_second()),
    ] {
        println!(
            "\nSpecies {name}: {} proteins, {} annotations, {:.2} terms per protein",
            stats.total_proteins(),
            stats.total_annotations(),
            stats.mean_terms()
        );
        for (term, count) in stats.most_common_terms() {
            println!("  {term}\t{count}");
        }
    }

    println!("\nHigh scoring pairs (>= 0.5):");
    for pair in result.high_quality_pairs(0.5).iter().take(10) {
        println!("  {}\t{}\t{:.4}", pair.first(), pair.second(), pair.score());
    }
}
