//! Line-chart image URLs
//!
//! Burndowns are embedded as an `<img>` pointing at a chart-image service
//! that draws an xy line chart from query-string data.

use url::form_urlencoded::byte_serialize;

const CHART_BASE_URL: &str = "https://chart.googleapis.com/chart";

/// One line on the chart
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub legend: String,
    /// Hex colour without the leading `#`
    pub color: String,
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
}

impl Series {
    /// Series whose x values are the positions 0, 1, 2, ...
    pub fn indexed(legend: impl Into<String>, color: impl Into<String>, ys: Vec<f64>) -> Self {
        let xs = (0..ys.len()).map(|i| i as f64).collect();
        Self {
            legend: legend.into(),
            color: color.into(),
            xs,
            ys,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineChart {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub series: Vec<Series>,
    pub x_labels: Vec<String>,
    pub y_max: f64,
    pub y_step: f64,
}

impl LineChart {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            width: 600,
            height: 400,
            title: title.into(),
            series: Vec::new(),
            x_labels: Vec::new(),
            y_max: 0.0,
            y_step: 1.0,
        }
    }

    pub fn series(mut self, series: Series) -> Self {
        self.series.push(series);
        self
    }

    pub fn x_labels(mut self, labels: Vec<String>) -> Self {
        self.x_labels = labels;
        self
    }

    pub fn y_range(mut self, max: f64, step: f64) -> Self {
        self.y_max = max;
        self.y_step = step;
        self
    }

    pub fn url(&self) -> String {
        let legends = self
            .series
            .iter()
            .map(|s| encode(&s.legend))
            .collect::<Vec<_>>()
            .join("|");
        let colors = self
            .series
            .iter()
            .map(|s| s.color.as_str())
            .collect::<Vec<_>>()
            .join(",");
        let data = self
            .series
            .iter()
            .map(|s| format!("{}|{}", join_numbers(&s.xs), join_numbers(&s.ys)))
            .collect::<Vec<_>>()
            .join("|");
        let x_labels = self
            .x_labels
            .iter()
            .map(|label| encode(label))
            .collect::<Vec<_>>()
            .join("|");

        let params = [
            ("cht", "lxy".to_string()),
            ("chs", format!("{}x{}", self.width, self.height)),
            ("chds", "a".to_string()),
            ("chtt", encode(&self.title)),
            ("chls", "1,6,6".to_string()),
            ("chxt", "x,y".to_string()),
            (
                "chxr",
                format!("1,0,{},{}", format_number(self.y_max), format_number(self.y_step)),
            ),
            ("chma", "50,0,0,50".to_string()),
            ("chdl", legends),
            ("chco", colors),
            ("chd", format!("t:{}", data)),
            ("chxl", format!("0:|{}", x_labels)),
        ];

        let query = params
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{}", CHART_BASE_URL, query)
    }
}

fn encode(text: &str) -> String {
    byte_serialize(text.as_bytes()).collect()
}

fn join_numbers(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| format_number(*v))
        .collect::<Vec<_>>()
        .join(",")
}

/// Whole numbers without a fraction, others rounded to two places
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        let rounded = (value * 100.0).round() / 100.0;
        format!("{}", rounded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(11.0), "11");
        assert_eq!(format_number(8.25), "8.25");
        assert_eq!(format_number(5.5), "5.5");
        assert_eq!(format_number(1.0 / 3.0), "0.33");
    }

    #[test]
    fn test_burndown_chart_url() {
        let chart = LineChart::new("Iteration Burndown")
            .series(Series::indexed(
                "Ideal Line",
                "00FF00",
                vec![11.0, 8.25, 5.5, 2.75, 0.0],
            ))
            .series(Series::indexed(
                "Burndown",
                "FF0000",
                vec![11.0, 6.0, 6.0, 3.0, 3.0],
            ))
            .x_labels(vec!["7-11".into(), "7-12".into(), "7-13".into()])
            .y_range(11.0, 1.0);

        let url = chart.url();
        assert!(url.starts_with("https://chart.googleapis.com/chart?cht=lxy&chs=600x400"));
        assert!(url.contains("&chtt=Iteration+Burndown&"));
        assert!(url.contains("&chdl=Ideal+Line|Burndown&"));
        assert!(url.contains("&chco=00FF00,FF0000&"));
        assert!(url.contains(
            "&chd=t:0,1,2,3,4|11,8.25,5.5,2.75,0|0,1,2,3,4|11,6,6,3,3&"
        ));
        assert!(url.contains("&chxr=1,0,11,1&"));
        assert!(url.ends_with("&chxl=0:|7-11|7-12|7-13"));
    }
}
