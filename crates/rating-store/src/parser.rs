//! Parsers for the CSV datasets.
//!
//! Three files share one record shape convention:
//! - `movies.csv`: movieId,title,genres (titles may be quoted and contain
//!   commas; genres are pipe-separated)
//! - `ratings.csv`: userId,movieId,rating,timestamp (the trailing timestamp
//!   is accepted and ignored)
//! - `new_ratings.csv`: userId,movieId,rating (the append-only log)
//!
//! A header row is optional in all three and detected rather than assumed.

use crate::error::{Result, StoreError};
use crate::types::{Movie, Rating};
use std::fs;
use std::path::Path;

/// Display name used in parse errors
fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Split one CSV line into fields, honoring double-quoted fields.
///
/// Inside quotes a comma is literal and `""` is an escaped quote. This is
/// the subset of CSV the MovieLens exports actually use.
fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut current));
            }
            _ => current.push(c),
        }
    }
    fields.push(current);
    fields
}

/// A line is a header when its first field is not numeric.
fn is_header(line: &str) -> bool {
    split_fields(line)
        .first()
        .map(|f| f.trim().parse::<u32>().is_err())
        .unwrap_or(false)
}

fn parse_field<T: std::str::FromStr>(
    value: &str,
    name: &str,
    file: &str,
    line_no: usize,
) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e| StoreError::Parse {
        file: file.to_string(),
        line: line_no,
        reason: format!("invalid {name} '{value}': {e}"),
    })
}

/// Parse a movie reference file.
///
/// Genres are split on `|`; the "(no genres listed)" placeholder yields an
/// empty genre list.
pub fn parse_movies(path: &Path) -> Result<Vec<Movie>> {
    let file = file_label(path);
    let content = fs::read_to_string(path)?;
    let mut movies = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || (idx == 0 && is_header(trimmed)) {
            continue;
        }

        let fields = split_fields(trimmed);
        if fields.len() != 3 {
            return Err(StoreError::Parse {
                file,
                line: line_no,
                reason: format!("expected 3 fields, found {}", fields.len()),
            });
        }

        let id = parse_field(&fields[0], "movieId", &file, line_no)?;
        let genres = match fields[2].trim() {
            "" | "(no genres listed)" => Vec::new(),
            listed => listed.split('|').map(|g| g.to_string()).collect(),
        };

        movies.push(Movie {
            id,
            title: fields[1].trim().to_string(),
            genres,
        });
    }

    Ok(movies)
}

/// Parse a ratings file.
///
/// Accepts both the 4-column base format (with timestamp) and the 3-column
/// log format; the timestamp is dropped either way.
pub fn parse_ratings(path: &Path) -> Result<Vec<Rating>> {
    let file = file_label(path);
    let content = fs::read_to_string(path)?;
    let mut ratings = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || (idx == 0 && is_header(trimmed)) {
            continue;
        }

        let fields = split_fields(trimmed);
        if fields.len() != 3 && fields.len() != 4 {
            return Err(StoreError::Parse {
                file,
                line: line_no,
                reason: format!("expected 3 or 4 fields, found {}", fields.len()),
            });
        }

        ratings.push(Rating {
            user_id: parse_field(&fields[0], "userId", &file, line_no)?,
            movie_id: parse_field(&fields[1], "movieId", &file, line_no)?,
            rating: parse_field(&fields[2], "rating", &file, line_no)?,
        });
    }

    Ok(ratings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(name: &str, content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(name);
        let mut f = fs::File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        (dir, path)
    }

    #[test]
    fn test_split_fields_plain() {
        assert_eq!(split_fields("1,2,3.5"), vec!["1", "2", "3.5"]);
    }

    #[test]
    fn test_split_fields_quoted_comma() {
        assert_eq!(
            split_fields(r#"11,"American President, The (1995)",Comedy|Drama|Romance"#),
            vec![
                "11",
                "American President, The (1995)",
                "Comedy|Drama|Romance"
            ]
        );
    }

    #[test]
    fn test_split_fields_escaped_quote() {
        assert_eq!(
            split_fields(r#"1,"He said ""hi""",Drama"#),
            vec!["1", r#"He said "hi""#, "Drama"]
        );
    }

    #[test]
    fn test_parse_ratings_with_and_without_timestamp() {
        let (_dir, path) = write_temp(
            "ratings.csv",
            "userId,movieId,rating,timestamp\n1,31,2.5,1260759144\n1,1029,3.0,1260759179\n",
        );
        let ratings = parse_ratings(&path).unwrap();
        assert_eq!(ratings.len(), 2);
        assert_eq!(ratings[0].user_id, 1);
        assert_eq!(ratings[0].movie_id, 31);
        assert_eq!(ratings[0].rating, 2.5);

        let (_dir, path) = write_temp("new_ratings.csv", "userId,movieId,rating\n7,50,4.5\n");
        let log = parse_ratings(&path).unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].movie_id, 50);
    }

    #[test]
    fn test_parse_ratings_headerless() {
        let (_dir, path) = write_temp("ratings.csv", "1,31,2.5\n");
        let ratings = parse_ratings(&path).unwrap();
        assert_eq!(ratings.len(), 1);
    }

    #[test]
    fn test_parse_ratings_bad_number() {
        let (_dir, path) = write_temp("ratings.csv", "userId,movieId,rating\n1,abc,3.0\n");
        let err = parse_ratings(&path).unwrap_err();
        assert!(matches!(err, StoreError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_parse_movies() {
        let (_dir, path) = write_temp(
            "movies.csv",
            "movieId,title,genres\n1,Toy Story (1995),Adventure|Animation|Children|Comedy|Fantasy\n126921,The Fox and the Hound 2 (2006),(no genres listed)\n",
        );
        let movies = parse_movies(&path).unwrap();
        assert_eq!(movies.len(), 2);
        assert_eq!(movies[0].title, "Toy Story (1995)");
        assert_eq!(movies[0].genres.len(), 5);
        assert!(movies[1].genres.is_empty());
    }

    #[test]
    fn test_parse_movies_field_count() {
        let (_dir, path) = write_temp("movies.csv", "movieId,title,genres\n1,Toy Story (1995)\n");
        let err = parse_movies(&path).unwrap_err();
        assert!(matches!(err, StoreError::Parse { line: 2, .. }));
    }
}
