//! Translate page requests to LIMIT/OFFSET.

use query_engine_sql::sql;

use crate::translation::error::Error;
use crate::translation::helpers::Env;
use crate::translation::request::Scalar;
use crate::translation::values;

/// A page of results. `offset = number * results_per_page` is known to fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    number: u32,
    results_per_page: u32,
}

impl Page {
    pub fn new(number: u32, results_per_page: u32) -> Result<Page, Error> {
        number
            .checked_mul(results_per_page)
            .ok_or_else(|| Error::malformed("pageNumber", "page offset is too large"))?;
        Ok(Page {
            number,
            results_per_page,
        })
    }

    /// Read `pageNumber` and `resultsPerPage`, falling back to the first page
    /// and the configured page size.
    pub fn from_request(
        env: &Env,
        page_number: Option<&Scalar>,
        results_per_page: Option<&Scalar>,
    ) -> Result<Page, Error> {
        let number = values::count("pageNumber", page_number)?.unwrap_or(0);
        let results_per_page = values::count("resultsPerPage", results_per_page)?
            .unwrap_or(env.default_results_per_page());
        Page::new(number, results_per_page)
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn results_per_page(&self) -> u32 {
        self.results_per_page
    }

    pub fn offset(&self) -> u32 {
        // checked in `new`
        self.number * self.results_per_page
    }

    pub fn to_limit(&self) -> sql::ast::Limit {
        sql::ast::Limit {
            limit: Some(self.results_per_page),
            offset: Some(self.offset()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn third_page_of_ten_starts_at_twenty() {
        let page = Page::from_request(&Env::default(), Some(&Scalar::from(2)), Some(&Scalar::from(10)))
            .unwrap();
        assert_eq!(page.offset(), 20);
        assert_eq!(
            page.to_limit(),
            sql::ast::Limit {
                limit: Some(10),
                offset: Some(20)
            }
        );
    }

    #[test]
    fn defaults_to_first_page_of_ten() {
        let page = Page::from_request(&Env::default(), None, Some(&Scalar::from(""))).unwrap();
        assert_eq!(page.number(), 0);
        assert_eq!(page.results_per_page(), 10);
        assert_eq!(page.offset(), 0);
    }

    #[test]
    fn configured_page_size_is_the_default() {
        let env = Env::new(None, 25);
        let page = Page::from_request(&env, Some(&Scalar::from("1")), None).unwrap();
        assert_eq!(page.offset(), 25);
    }

    #[test]
    fn overflowing_offset_is_rejected() {
        assert!(Page::new(u32::MAX, 10).is_err());
    }
}
