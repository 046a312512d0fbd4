//! List every DNS record of a service, then create a CNAME record.
//!
//! ```bash
//! ACTIVE24_API_KEY=xxx ACTIVE24_API_SECRET=xxx \
//!     cargo run -p active24-dns --example list_and_create -- 12345678
//! ```

use active24_dns::{ApiError, Client, DnsRecord, DnsRecordType};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let service_id: u64 = std::env::args()
        .nth(1)
        .ok_or("usage: list_and_create <service-id>")?
        .parse()?;

    let client = Client::from_env()?;
    let records = client.dns(service_id);

    // 列出全部记录；超过分页上限时仍打印已取得的部分
    let all = match records.list_all().await {
        Ok(all) => all,
        Err(ApiError::PageLimitExceeded { max_pages, records }) => {
            eprintln!("warning: stopped after {max_pages} pages, result is partial");
            records
        }
        Err(e) => return Err(e.into()),
    };
    for rec in &all {
        let record_type = rec.record_type.as_ref().map(ToString::to_string);
        println!(
            "rec[type:{}, name:{}, ttl:{}]",
            record_type.as_deref().unwrap_or("-"),
            rec.name,
            rec.ttl
        );
    }

    let cname = DnsRecord::new("host1", 600)
        .with_type(DnsRecordType::Cname)
        .with_content("host.example.com");
    records.create(&cname).await?;
    println!("created CNAME host1 -> host.example.com");

    Ok(())
}
