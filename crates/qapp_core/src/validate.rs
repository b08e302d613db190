use url::Url;

/// True iff `candidate` parses as an absolute URL with a scheme and a host.
///
/// `url` accepts authority-less URLs such as `mailto:x` or `data:,`; those are
/// rejected here because the archiver needs something it can crawl.
pub fn is_valid_url(candidate: &str) -> bool {
    match Url::parse(candidate) {
        Ok(parsed) => parsed.has_host() && !parsed.cannot_be_a_base(),
        Err(_) => false,
    }
}
