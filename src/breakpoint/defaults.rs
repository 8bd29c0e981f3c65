use super::BreakPoint;

struct RawBreakPoint {
    alias: &'static str,
    media_query: &'static str,
    priority: i32,
    overlapping: bool,
}

const fn raw(
    alias: &'static str,
    media_query: &'static str,
    priority: i32,
    overlapping: bool,
) -> RawBreakPoint {
    RawBreakPoint {
        alias,
        media_query,
        priority,
        overlapping,
    }
}

// Overlapping `gt-*` ranges carry negative priorities so that any exact range
// outranks them, and a narrower `gt-*` outranks a wider one.
const DEFAULTS: [RawBreakPoint; 9] = [
    raw("xs", "(min-width: 0px) and (max-width: 599px)", 1000, false),
    raw("gt-xs", "(min-width: 600px)", -950, true),
    raw("sm", "(min-width: 600px) and (max-width: 959px)", 900, false),
    raw("gt-sm", "(min-width: 960px)", -850, true),
    raw("md", "(min-width: 960px) and (max-width: 1279px)", 800, false),
    raw("gt-md", "(min-width: 1280px)", -750, true),
    raw("lg", "(min-width: 1280px) and (max-width: 1919px)", 700, false),
    raw("gt-lg", "(min-width: 1920px)", -650, true),
    raw("xl", "(min-width: 1920px) and (max-width: 5000px)", 600, false),
];

const HANDSET_PORTRAIT: &str = "(orientation: portrait) and (max-width: 599px)";
const HANDSET_LANDSCAPE: &str = "(orientation: landscape) and (max-width: 959px)";
const TABLET_PORTRAIT: &str = "(orientation: portrait) and (min-width: 600px) and (max-width: 839px)";
const TABLET_LANDSCAPE: &str =
    "(orientation: landscape) and (min-width: 960px) and (max-width: 1279px)";
const WEB_PORTRAIT: &str = "(orientation: portrait) and (min-width: 840px)";
const WEB_LANDSCAPE: &str = "(orientation: landscape) and (min-width: 1280px)";

fn build(list: &[RawBreakPoint]) -> Vec<BreakPoint> {
    list.iter()
        .map(|raw| {
            let bp = BreakPoint::new(raw.alias, raw.media_query, raw.priority);
            if raw.overlapping { bp.overlapping() } else { bp }
        })
        .collect()
}

/// The nine width breakpoints: `xs`, `sm`, `md`, `lg`, `xl` and the four
/// overlapping `gt-*` ranges.
pub fn default_breakpoints() -> Vec<BreakPoint> {
    build(&DEFAULTS)
}

/// Device orientation breakpoints (`handset`, `tablet`, `web` and their
/// `.portrait` / `.landscape` variants).
pub fn orientation_breakpoints() -> Vec<BreakPoint> {
    let handset = format!("{HANDSET_PORTRAIT}, {HANDSET_LANDSCAPE}");
    let tablet = format!("{TABLET_PORTRAIT}, {TABLET_LANDSCAPE}");
    let web = format!("{WEB_PORTRAIT}, {WEB_LANDSCAPE}");
    vec![
        BreakPoint::new("handset", handset, 2000),
        BreakPoint::new("handset.landscape", HANDSET_LANDSCAPE, 2000),
        BreakPoint::new("handset.portrait", HANDSET_PORTRAIT, 2000),
        BreakPoint::new("tablet", tablet, 2100),
        BreakPoint::new("tablet.landscape", TABLET_LANDSCAPE, 2100),
        BreakPoint::new("tablet.portrait", TABLET_PORTRAIT, 2100),
        BreakPoint::new("web", web, 2200),
        BreakPoint::new("web.landscape", WEB_LANDSCAPE, 2200),
        BreakPoint::new("web.portrait", WEB_PORTRAIT, 2200),
    ]
}

pub fn print_breakpoint() -> BreakPoint {
    BreakPoint::new("print", "print", 1500)
}
