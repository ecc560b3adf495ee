//! Timeline command: declared segments and where they play on the page

use super::load_config;
use anyhow::Result;
use loupe_animator::keyframes;
use loupe_scroll::Scrub;

pub fn run(config: Option<&str>) -> Result<()> {
    let config = load_config(config)?;
    let document = config.page.build_document()?;
    let timelines = keyframes::build_timelines(&config.animation)?;

    println!(
        "Page: {}x{}, max scroll {}px, hook wiring {}",
        document.viewport_width(),
        document.viewport_height(),
        document.max_scroll(),
        config.animation.hook_wiring
    );

    for timeline in &timelines {
        println!();
        println!("Timeline '{}' ({} segments)", timeline.name, timeline.len());
        for (i, segment) in timeline.segments.iter().enumerate() {
            let hooked = config.animation.hook_wiring.hooks(&segment.target);
            let to = segment
                .to
                .iter()
                .map(|(prop, value)| format!("{}={}", prop, value))
                .collect::<Vec<_>>()
                .join(", ");
            let scrub = match segment.trigger.scrub {
                Scrub::Linked => "linked".to_string(),
                Scrub::Smoothed(s) => format!("{}s", s),
            };
            let range = match segment.trigger.resolve(&document) {
                Ok(range) => format!("[{:.0}, {:.0}]", range.start, range.end),
                Err(e) => format!("skipped ({})", e),
            };
            println!(
                "  {}. {} -> {{{}}} on {} \"{}\" .. \"{}\" {} scrub {}{}",
                i + 1,
                segment.target,
                to,
                segment.trigger.trigger,
                segment.trigger.start,
                segment.trigger.end,
                range,
                scrub,
                if hooked { " [hooked]" } else { "" }
            );
        }
    }

    Ok(())
}
