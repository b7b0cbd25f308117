use fibre_lazy::{LazyValue, ResolveError, Resolver, ServiceKey};
use std::collections::HashMap;
use std::sync::Arc;

struct MailerConfig {
  smtp_host: String,
}

// A toy registry that knows how to build named configurations.
struct ConfigRegistry {
  hosts: HashMap<ServiceKey, String>,
}

impl Resolver<ServiceKey, Arc<MailerConfig>> for ConfigRegistry {
  type Error = ResolveError;

  fn resolve(&self, key: &ServiceKey) -> Result<Arc<MailerConfig>, ResolveError> {
    println!("Resolving {}...", key);
    let host = self.hosts.get(key).ok_or_else(|| ResolveError::not_found(key))?;
    Ok(Arc::new(MailerConfig {
      smtp_host: host.clone(),
    }))
  }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
  let primary = ServiceKey::named::<MailerConfig>("primary")?;
  let backup = ServiceKey::named::<MailerConfig>("backup")?;

  let registry = Arc::new(ConfigRegistry {
    hosts: HashMap::from([(primary.clone(), "smtp.example.com".to_string())]),
  });

  let primary_config: LazyValue<Arc<MailerConfig>, ResolveError> =
    LazyValue::from_key(primary, registry.clone());
  let backup_config: LazyValue<Arc<MailerConfig>, ResolveError> =
    LazyValue::from_key(backup, registry);

  println!("Primary host: {}", primary_config.get_instance()?.smtp_host);
  // Already cached, the registry is not asked again.
  println!("Primary host: {}", primary_config.get_instance()?.smtp_host);

  match backup_config.get_instance() {
    Ok(config) => println!("Backup host: {}", config.smtp_host),
    Err(err) => println!("Backup unavailable: {}", err),
  }

  // An invalid key name is rejected before anything is resolved.
  if let Err(err) = ServiceKey::named::<MailerConfig>("") {
    println!("Rejected key: {}", err);
  }

  Ok(())
}
