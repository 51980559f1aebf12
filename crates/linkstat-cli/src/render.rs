use anyhow::Result;
use chrono::NaiveDateTime;
use colored::Colorize;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use linkstat_core::report::{DashboardReport, LinkCard, LinkDetail};
use linkstat_core::{Page, SeriesPoint, TimeWindow};
use serde::Serialize;

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_dashboard(report: &DashboardReport, window: TimeWindow) {
    println!("\n  {} ({})", "Link dashboard".cyan().bold(), window);

    if report.is_empty() {
        println!("  {}", "No clicks match the current filters.".bright_black());
        return;
    }

    let summary = &report.summary;
    println!(
        "  Clicks: {} | Links: {} | Affiliate: {} ({})\n",
        format_number(summary.total_clicks).bold(),
        format_number(summary.unique_links),
        format_number(summary.affiliate_clicks),
        format_percent(summary.affiliate_rate)
    );

    let mut table = new_table(vec!["#", "Link", "Clicks", "Affiliate", "Top source", "Top country"]);
    for (i, row) in report.links.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&row.name),
            Cell::new(format_number(row.clicks)).set_alignment(CellAlignment::Right),
            Cell::new(if row.affiliate { "yes" } else { "" }),
            Cell::new(&row.top_source),
            Cell::new(&row.top_country),
        ]);
    }
    println!("{table}");

    print_series("Clicks by day", &report.timeline);
    print_series("Top sources", &report.sources);
    print_series("Browsers", &report.browsers);
    print_series("Top countries", &report.countries);
}

pub fn print_cards(page: &Page<LinkCard>, window: TimeWindow) {
    println!("\n  {} ({})", "Links".cyan().bold(), window);

    if page.total_items == 0 {
        println!("  {}", "No links match the current filters.".bright_black());
        return;
    }
    if page.is_empty() {
        println!(
            "  {}",
            format!("Page {} is past the last page ({}).", page.page, page.total_pages)
                .bright_black()
        );
        return;
    }

    let mut table = new_table(vec![
        "Link",
        "Short URL",
        "Clicks",
        "Countries",
        "Browsers",
        "Top source",
        "Last click",
    ]);
    for card in &page.items {
        let name = if card.affiliate {
            format!("{} {}", card.display_name, "[aff]".yellow())
        } else {
            card.display_name.clone()
        };
        table.add_row(vec![
            Cell::new(name),
            Cell::new(&card.short_url),
            Cell::new(format_number(card.stats.total_clicks)).set_alignment(CellAlignment::Right),
            Cell::new(card.stats.unique_countries).set_alignment(CellAlignment::Right),
            Cell::new(card.stats.unique_browsers).set_alignment(CellAlignment::Right),
            Cell::new(&card.stats.top_source),
            Cell::new(format_last_click(card.stats.last_click)),
        ]);
    }
    println!("{table}");
    print_page_footer(page);
}

pub fn print_detail(detail: &LinkDetail, window: TimeWindow) {
    println!("\n  {} ({})", detail.name.cyan().bold(), window);
    println!("  {}", detail.short_url);
    match &detail.original_url {
        Some(url) => println!("  -> {}", url.bright_black()),
        None => println!("  {}", "Not in the link registry.".yellow()),
    }

    let stats = &detail.stats;
    if stats.total_clicks == 0 {
        println!("  {}", "No clicks recorded in this window.".bright_black());
        return;
    }

    println!(
        "\n  Clicks: {} | Unique IPs: {} | Human: {} ({}) | Bot: {}",
        format_number(stats.total_clicks).bold(),
        format_number(stats.unique_ips),
        format_number(stats.human_clicks),
        format_percent(stats.human_rate),
        format_number(stats.bot_clicks)
    );
    println!(
        "  Countries: {} | Cities: {} | Affiliate: {}",
        stats.unique_countries,
        stats.unique_cities,
        if stats.affiliate { "yes" } else { "no" }
    );

    print_series("Clicks by day", &detail.timeline);
    print_series("Sources", &detail.sources);
    print_series("Countries", &detail.countries);
    print_series("Browsers", &detail.browsers);

    println!("\n  {}", "Recent clicks".bold());
    let mut table = new_table(vec![
        "Date", "Time", "Country", "City", "Browser", "Medium", "Referrer",
    ]);
    for row in &detail.clicks.items {
        table.add_row(vec![
            &row.date,
            &row.time,
            &row.country,
            &row.city,
            &row.browser,
            &row.medium,
            &row.referrer,
        ]);
    }
    println!("{table}");
    print_page_footer(&detail.clicks);
}

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(header);
    table
}

fn print_series(title: &str, series: &[SeriesPoint]) {
    if series.is_empty() {
        return;
    }
    let max = series.iter().map(|p| p.value).max().unwrap_or(0);
    println!("\n  {}", title.bold());
    for point in series {
        println!(
            "  {:<20} {:>6}  {}",
            truncate(&point.label, 20),
            format_number(point.value),
            bar(point.value, max).green()
        );
    }
}

fn print_page_footer<T>(page: &Page<T>) {
    if page.total_pages > 1 {
        println!(
            "{}",
            format!(
                "  Page {} of {} ({} total)",
                page.page,
                page.total_pages,
                format_number(page.total_items)
            )
            .bright_black()
        );
    }
}

const BAR_WIDTH: usize = 30;

fn bar(value: usize, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let width = (value * BAR_WIDTH).div_ceil(max);
    "█".repeat(width)
}

fn truncate(label: &str, max_chars: usize) -> String {
    if label.chars().count() <= max_chars {
        return label.to_string();
    }
    let mut out: String = label.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn format_last_click(last: Option<NaiveDateTime>) -> String {
    last.map(|ts| ts.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn format_percent(rate: f64) -> String {
    format!("{:.1}%", rate)
}

fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}
