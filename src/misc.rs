use std::time::Duration;

pub fn http_client() -> Result<isahc::HttpClient, isahc::Error> {
    use isahc::config::Configurable;

    isahc::HttpClient::builder()
        .low_speed_timeout(1, Duration::from_secs(30))
        .redirect_policy(isahc::config::RedirectPolicy::Follow)
        .build()
}

pub fn format_error(source: &(dyn std::error::Error + 'static)) -> String {
    let mut out = fomat!((source));

    let mut source = source.source();
    while let Some(why) = source {
        out.push_str(&fomat!(": "(why)));
        source = why.source();
    }

    out
}
