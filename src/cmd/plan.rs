use pdfpane::Config;

use super::output::output_plan;

pub fn cmd_plan(config: &Config, reference: &str) {
    let strategy = config.render_strategy();
    println!("🧭 Platform: {}", strategy.platform());
    output_plan(&strategy.plan(reference));
}
