const INDEX_HEADER: &str = "(index)";

#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<S: Into<String>>(headers: impl IntoIterator<Item = S>) -> Self {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row<S: Into<String>>(&mut self, cells: impl IntoIterator<Item = S>) {
        let mut row: Vec<String> = cells.into_iter().map(Into::into).collect();
        row.resize(self.headers.len(), String::new());
        self.rows.push(row);
    }

    pub fn render(&self) -> String {
        let header: Vec<&str> = std::iter::once(INDEX_HEADER)
            .chain(self.headers.iter().map(String::as_str))
            .collect();
        let indices: Vec<String> = (0..self.rows.len()).map(|i| i.to_string()).collect();
        let body: Vec<Vec<&str>> = self
            .rows
            .iter()
            .zip(&indices)
            .map(|(row, index)| {
                std::iter::once(index.as_str())
                    .chain(row.iter().map(String::as_str))
                    .collect()
            })
            .collect();

        let widths: Vec<usize> = (0..header.len())
            .map(|col| {
                body.iter()
                    .map(|row| row[col].chars().count())
                    .chain(std::iter::once(header[col].chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut out = String::new();
        out.push_str(&border(&widths, '┌', '┬', '┐'));
        out.push_str(&line(&header, &widths));
        out.push_str(&border(&widths, '├', '┼', '┤'));
        for row in &body {
            out.push_str(&line(row, &widths));
        }
        out.push_str(&border(&widths, '└', '┴', '┘'));
        out
    }
}

fn border(widths: &[usize], left: char, middle: char, right: char) -> String {
    let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
    format!("{left}{}{right}\n", segments.join(&middle.to_string()))
}

fn line(cells: &[&str], widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width - cell.chars().count();
            format!(" {cell}{} ", " ".repeat(pad))
        })
        .collect();
    format!("│{}│\n", padded.join("│"))
}
