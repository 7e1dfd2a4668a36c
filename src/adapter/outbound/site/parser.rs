//! Selector-based listing extraction.

use scraper::{ElementRef, Html, Selector};
use url::Url;

use super::profile::{SiteProfile, SiteSelectors};
use crate::domain::Listing;
use crate::error::{Result, SourceError};

/// Compiled selectors for one site.
///
/// Construction validates every selector and the base URL, so a bad profile
/// fails once at startup instead of on every cycle.
#[derive(Debug)]
pub struct ListingParser {
    source: String,
    base_url: Url,
    title: Selector,
    address: Selector,
    link: Selector,
    price: Selector,
    ready_marker: Option<Selector>,
}

fn compile(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| {
        SourceError::Selector {
            selector: selector.to_string(),
            reason: e.to_string(),
        }
        .into()
    })
}

/// Element text with whitespace runs collapsed to single spaces.
fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

impl ListingParser {
    /// Compile the selectors of a site profile.
    ///
    /// # Errors
    /// Returns [`SourceError::Selector`] for an unparsable selector and
    /// [`SourceError::Link`] for an invalid base URL.
    pub fn new(profile: &SiteProfile) -> Result<Self> {
        let SiteSelectors {
            title,
            address,
            link,
            price,
        } = &profile.selectors;

        let base_url = Url::parse(&profile.base_url).map_err(|source| SourceError::Link {
            link: profile.base_url.clone(),
            source,
        })?;

        Ok(Self {
            source: profile.name.clone(),
            base_url,
            title: compile(title)?,
            address: compile(address)?,
            link: compile(link)?,
            price: compile(price)?,
            ready_marker: profile.ready_marker.as_deref().map(compile).transpose()?,
        })
    }

    /// Whether the page has finished rendering its result list.
    ///
    /// Always true for profiles without a ready marker.
    #[must_use]
    pub fn is_ready(&self, html: &str) -> bool {
        match &self.ready_marker {
            Some(marker) => Html::parse_document(html).select(marker).next().is_some(),
            None => true,
        }
    }

    /// Extract listings in page order.
    ///
    /// # Errors
    /// Returns [`SourceError::Layout`] when the four columns do not line up
    /// and [`SourceError::Link`] when a link cannot be resolved.
    pub fn parse(&self, html: &str) -> Result<Vec<Listing>> {
        let document = Html::parse_document(html);

        let titles: Vec<String> = document.select(&self.title).map(element_text).collect();
        let addresses: Vec<String> = document.select(&self.address).map(element_text).collect();
        let prices: Vec<String> = document.select(&self.price).map(element_text).collect();
        let hrefs: Vec<&str> = document
            .select(&self.link)
            .map(|el| el.value().attr("href").unwrap_or_default())
            .collect();

        let count = titles.len();
        if addresses.len() != count || prices.len() != count || hrefs.len() != count {
            return Err(SourceError::Layout(format!(
                "{} titles, {} addresses, {} links, {} prices",
                count,
                addresses.len(),
                hrefs.len(),
                prices.len()
            ))
            .into());
        }

        let links = hrefs
            .into_iter()
            .map(|href| self.resolve(href))
            .collect::<Result<Vec<_>>>()?;

        Ok(titles
            .into_iter()
            .zip(addresses)
            .zip(prices)
            .zip(links)
            .map(|(((name, address), price), link)| {
                Listing::new(&self.source, link, name, price, address)
            })
            .collect())
    }

    fn resolve(&self, href: &str) -> Result<String> {
        if href.is_empty() {
            return Err(SourceError::Layout("link without href".to_string()).into());
        }
        self.base_url
            .join(href)
            .map(String::from)
            .map_err(|source| {
                SourceError::Link {
                    link: href.to_string(),
                    source,
                }
                .into()
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::time::Duration;

    fn profile(ready_marker: Option<&str>) -> SiteProfile {
        SiteProfile {
            name: "pararius".into(),
            url: "https://www.pararius.nl/huurwoningen/amsterdam".into(),
            base_url: "https://www.pararius.nl".into(),
            ready_marker: ready_marker.map(String::from),
            deadline: Duration::from_secs(10),
            poll_interval: Duration::from_millis(300),
            selectors: SiteSelectors {
                title: ".listing-search-item__title".into(),
                address: ".listing-search-item__sub-title".into(),
                link: ".listing-search-item__link--title".into(),
                price: ".listing-search-item__price".into(),
            },
        }
    }

    const PAGE: &str = r#"
        <html><body>
          <div class="search-list-sorting">Nieuwste eerst</div>
          <ul>
            <li>
              <h2 class="listing-search-item__title">
                <a class="listing-search-item__link--title" href="/appartement-te-huur/amsterdam/1/keizersgracht">
                  Appartement   Keizersgracht
                </a>
              </h2>
              <div class="listing-search-item__sub-title">1015 CJ Amsterdam (Grachtengordel)</div>
              <div class="listing-search-item__price">€1.850 per maand</div>
            </li>
            <li>
              <h2 class="listing-search-item__title">
                <a class="listing-search-item__link--title" href="https://www.pararius.nl/huis-te-huur/amsterdam/2/jordaan">Huis Jordaan</a>
              </h2>
              <div class="listing-search-item__sub-title">1016 AB Amsterdam</div>
              <div class="listing-search-item__price">€1.999 per maand</div>
            </li>
          </ul>
        </body></html>
    "#;

    #[test]
    fn parses_listings_in_page_order() {
        let parser = ListingParser::new(&profile(None)).unwrap();

        let listings = parser.parse(PAGE).unwrap();

        assert_eq!(listings.len(), 2);
        assert_eq!(listings[0].name(), "Appartement Keizersgracht");
        assert_eq!(listings[0].address(), "1015 CJ Amsterdam (Grachtengordel)");
        assert_eq!(listings[0].price(), "€1.850 per maand");
        assert_eq!(
            listings[0].link(),
            "https://www.pararius.nl/appartement-te-huur/amsterdam/1/keizersgracht"
        );
        assert_eq!(listings[0].source(), "pararius");
        assert_eq!(
            listings[1].link(),
            "https://www.pararius.nl/huis-te-huur/amsterdam/2/jordaan"
        );
    }

    #[test]
    fn page_without_results_is_empty_not_error() {
        let parser = ListingParser::new(&profile(None)).unwrap();

        let listings = parser.parse("<html><body><p>Geen resultaten</p></body></html>");

        assert!(listings.unwrap().is_empty());
    }

    #[test]
    fn column_mismatch_is_layout_error() {
        let parser = ListingParser::new(&profile(None)).unwrap();
        let html = r#"
            <h2 class="listing-search-item__title">A</h2>
            <h2 class="listing-search-item__title">B</h2>
            <a class="listing-search-item__link--title" href="/a">A</a>
            <div class="listing-search-item__sub-title">x</div>
            <div class="listing-search-item__sub-title">y</div>
            <div class="listing-search-item__price">1</div>
            <div class="listing-search-item__price">2</div>
        "#;

        let err = parser.parse(html).unwrap_err();

        assert!(matches!(err, Error::Source(SourceError::Layout(_))));
        assert!(err.to_string().contains("2 titles"));
    }

    #[test]
    fn invalid_selector_is_rejected_at_construction() {
        let mut bad = profile(None);
        bad.selectors.price = "div[".into();

        let err = ListingParser::new(&bad).unwrap_err();

        assert!(matches!(err, Error::Source(SourceError::Selector { .. })));
    }

    #[test]
    fn invalid_base_url_is_rejected_at_construction() {
        let mut bad = profile(None);
        bad.base_url = "not a url".into();

        assert!(ListingParser::new(&bad).is_err());
    }

    #[test]
    fn ready_marker_detection() {
        let parser = ListingParser::new(&profile(Some(".search-list-sorting"))).unwrap();

        assert!(parser.is_ready(PAGE));
        assert!(!parser.is_ready("<html><body>Loading...</body></html>"));
    }

    #[test]
    fn no_marker_means_always_ready() {
        let parser = ListingParser::new(&profile(None)).unwrap();
        assert!(parser.is_ready(""));
    }
}
