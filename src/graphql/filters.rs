//! In-memory filtering for `allBooks`
//!
//! Filters are exact-match predicates applied to the fully materialized book
//! list: genre membership first, then author name.

use super::types::Book;

/// Treat absent and empty filter arguments alike
fn given(arg: Option<&str>) -> Option<&str> {
    arg.filter(|s| !s.is_empty())
}

/// Keep books whose genres contain `genre` exactly
pub fn by_genre(books: Vec<Book>, genre: &str) -> Vec<Book> {
    books
        .into_iter()
        .filter(|b| b.genres.iter().any(|g| g == genre))
        .collect()
}

/// Keep books whose resolved author is named `author` exactly
pub fn by_author(books: Vec<Book>, author: &str) -> Vec<Book> {
    books.into_iter().filter(|b| b.author.name == author).collect()
}

/// Apply the `allBooks` filter arguments
pub fn filter_books(books: Vec<Book>, author: Option<&str>, genre: Option<&str>) -> Vec<Book> {
    match (given(author), given(genre)) {
        (None, None) => books,
        (Some(author), Some(genre)) => by_author(by_genre(books, genre), author),
        (Some(author), None) => by_author(books, author),
        (None, Some(genre)) => by_genre(books, genre),
    }
}

#[cfg(test)]
mod tests {
    use async_graphql::ID;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::graphql::types::Author;

    fn book(title: &str, author: &str, genres: &[&str]) -> Book {
        Book {
            title: title.to_string(),
            published: 2000,
            author: Author {
                name: author.to_string(),
                born: None,
                id: ID(format!("author-{}", author)),
            },
            id: ID(format!("book-{}", title)),
            genres: genres.iter().map(|g| g.to_string()).collect(),
        }
    }

    fn catalog() -> Vec<Book> {
        vec![
            book("Clean Code", "Robert Martin", &["refactoring"]),
            book("Agile software development", "Robert Martin", &["agile", "patterns", "design"]),
            book("Refactoring, edition 2", "Martin Fowler", &["refactoring"]),
            book("Refactoring to patterns", "Joshua Kerievsky", &["refactoring", "patterns"]),
            book("Crime and punishment", "Fyodor Dostoevsky", &["classic", "crime"]),
        ]
    }

    fn titles(books: &[Book]) -> Vec<&str> {
        books.iter().map(|b| b.title.as_str()).collect()
    }

    #[test]
    fn test_no_filters_returns_everything() {
        assert_eq!(filter_books(catalog(), None, None), catalog());
    }

    #[test]
    fn test_empty_arguments_are_ignored() {
        assert_eq!(filter_books(catalog(), Some(""), Some("")), catalog());
    }

    #[test]
    fn test_genre_only() {
        let result = filter_books(catalog(), None, Some("refactoring"));
        assert_eq!(
            titles(&result),
            vec!["Clean Code", "Refactoring, edition 2", "Refactoring to patterns"]
        );
    }

    #[test]
    fn test_author_only() {
        let result = filter_books(catalog(), Some("Robert Martin"), None);
        assert_eq!(titles(&result), vec!["Clean Code", "Agile software development"]);
    }

    #[test]
    fn test_genre_match_is_exact() {
        assert!(filter_books(catalog(), None, Some("pattern")).is_empty());
        assert!(filter_books(catalog(), Some("Robert"), None).is_empty());
    }

    #[test]
    fn test_both_filters_equal_intersection() {
        let pairs = [
            ("Robert Martin", "patterns"),
            ("Robert Martin", "refactoring"),
            ("Martin Fowler", "classic"),
            ("Fyodor Dostoevsky", "crime"),
        ];

        for (author, genre) in pairs {
            let both = filter_books(catalog(), Some(author), Some(genre));
            let by_author_only = filter_books(catalog(), Some(author), None);
            let intersection: Vec<Book> = filter_books(catalog(), None, Some(genre))
                .into_iter()
                .filter(|b| by_author_only.iter().any(|a| a.id == b.id))
                .collect();

            assert_eq!(both, intersection, "author={} genre={}", author, genre);
        }
    }

    #[test]
    fn test_order_preserved() {
        let result = filter_books(catalog(), None, Some("patterns"));
        assert_eq!(titles(&result), vec!["Agile software development", "Refactoring to patterns"]);
    }
}
