use std::io::{self, BufRead, Write};

pub fn interactive() -> bool {
    atty::is(atty::Stream::Stdin)
}

pub fn confirm(question: &str) -> io::Result<bool> {
    print!("{} [y/N] ", question);
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;

    let answer = line.trim().to_ascii_lowercase();
    Ok(answer == "y" || answer == "yes")
}

/// Numbered multi-select; an empty answer selects nothing.
pub fn multi_select(header: &str, items: &[String]) -> io::Result<Vec<usize>> {
    println!("{}", header);
    for (index, item) in items.iter().enumerate() {
        println!("  {}. {}", index + 1, item);
    }

    print!("Select (comma-separated numbers, empty to cancel): ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;

    Ok(parse_selection(&line, items.len()))
}

fn parse_selection(line: &str, item_count: usize) -> Vec<usize> {
    let mut selected = Vec::new();

    for token in line.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }

        if let Ok(number) = token.parse::<usize>()
            && number >= 1
            && number <= item_count
        {
            let index = number - 1;
            if !selected.contains(&index) {
                selected.push(index);
            }
        }
    }

    selected
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_selection_lists() {
        assert_eq!(parse_selection("1,3", 4), vec![0, 2]);
        assert_eq!(parse_selection(" 2 , 2 ,4 ", 4), vec![1, 3]);
        assert_eq!(parse_selection("", 4), Vec::<usize>::new());
        assert_eq!(parse_selection("0,5,junk", 4), Vec::<usize>::new());
    }
}
