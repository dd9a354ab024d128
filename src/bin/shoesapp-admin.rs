use clap::{Arg, ArgMatches, Command};
use log::error;
use serde::Serialize;
use shoesapp_admin::entity::{Criteria, EntityController, EntityRecord, ListRequest};
use shoesapp_admin::error::Error;
use shoesapp_admin::ShopAdmin;

fn entity_arg() -> Arg<'static> {
    Arg::new("entity")
        .help("categories, products, favorites, bills or sizes")
        .required(true)
        .possible_values(["categories", "products", "favorites", "bills", "sizes"])
}

fn id_arg() -> Arg<'static> {
    Arg::new("id").help("Record id").required(true)
}

fn cli() -> Command<'static> {
    Command::new("shoesapp-admin")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Inspect and manage shoesApp entities")
        .subcommand_required(true)
        .subcommand(
            Command::new("list")
                .about("List a page of records")
                .arg(entity_arg())
                .arg(Arg::new("page").long("page").takes_value(true))
                .arg(Arg::new("size").long("size").takes_value(true))
                .arg(
                    Arg::new("sort")
                        .long("sort")
                        .takes_value(true)
                        .multiple_occurrences(true)
                        .help("field,asc|desc"),
                ),
        )
        .subcommand(
            Command::new("get")
                .about("Show one record")
                .arg(entity_arg())
                .arg(id_arg()),
        )
        .subcommand(
            Command::new("delete")
                .about("Delete one record")
                .arg(entity_arg())
                .arg(id_arg()),
        )
        .subcommand(
            Command::new("count")
                .about("Count records")
                .arg(entity_arg()),
        )
}

fn parse_number<N: std::str::FromStr>(matches: &ArgMatches, name: &str) -> Result<Option<N>, Error> {
    matches
        .value_of(name)
        .map(|raw| {
            raw.parse::<N>()
                .map_err(|_| Error::invalid_parameters(format!("{} must be a number: {}", name, raw)))
        })
        .transpose()
}

fn print_json<S: Serialize>(value: &S) -> Result<(), Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run_on<T: EntityRecord>(
    controller: &EntityController<T>,
    command: &str,
    matches: &ArgMatches,
) -> Result<(), Error> {
    match command {
        "list" => {
            let mut request = ListRequest::new();
            if let Some(page) = parse_number::<u32>(matches, "page")? {
                request = request.page(page);
            }
            if let Some(size) = parse_number::<u32>(matches, "size")? {
                request = request.size(size);
            }
            for sort in matches.values_of("sort").into_iter().flatten() {
                request = request.sort_raw(sort);
            }
            let entities = controller.list(&request).await?;
            print_json(&entities)?;
            eprintln!("total: {}", controller.state().total_items);
        }
        "get" => {
            let id = parse_number::<i64>(matches, "id")?
                .ok_or_else(|| Error::invalid_parameters("id is required"))?;
            print_json(&controller.fetch_one(id).await?)?;
        }
        "delete" => {
            let id = parse_number::<i64>(matches, "id")?
                .ok_or_else(|| Error::invalid_parameters("id is required"))?;
            controller.delete(id).await?;
            controller.shutdown();
            println!("deleted {} {}", T::NAME, id);
        }
        "count" => println!("{}", controller.count(&Criteria::new()).await?),
        other => return Err(Error::invalid_parameters(format!("unknown command {}", other))),
    }
    Ok(())
}

async fn run(matches: ArgMatches) -> Result<(), Error> {
    let admin = ShopAdmin::from_env()?;
    let (command, sub) = matches
        .subcommand()
        .ok_or_else(|| Error::invalid_parameters("missing command"))?;

    match sub.value_of("entity").unwrap_or_default() {
        "categories" => run_on(admin.categories(), command, sub).await,
        "products" => run_on(admin.products(), command, sub).await,
        "favorites" => run_on(admin.favorites(), command, sub).await,
        "bills" => run_on(admin.bills(), command, sub).await,
        "sizes" => run_on(admin.sizes(), command, sub).await,
        other => Err(Error::invalid_parameters(format!("unknown entity {}", other))),
    }
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    env_logger::init();

    if let Err(e) = run(cli().get_matches()).await {
        error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        cli().debug_assert();
    }

    #[test]
    fn test_list_arguments_parse() {
        let matches = cli()
            .try_get_matches_from([
                "shoesapp-admin", "list", "sizes", "--page", "1", "--sort", "name,asc", "--sort", "id,desc",
            ])
            .unwrap();
        let (command, sub) = matches.subcommand().unwrap();

        assert_eq!(command, "list");
        assert_eq!(sub.value_of("entity"), Some("sizes"));
        assert_eq!(parse_number::<u32>(sub, "page").unwrap(), Some(1));
        assert_eq!(parse_number::<u32>(sub, "size").unwrap(), None);
        assert_eq!(
            sub.values_of("sort").unwrap().collect::<Vec<_>>(),
            vec!["name,asc", "id,desc"]
        );
    }

    #[test]
    fn test_non_numeric_id_is_rejected() {
        let matches = cli()
            .try_get_matches_from(["shoesapp-admin", "get", "products", "abc"])
            .unwrap();
        let (_, sub) = matches.subcommand().unwrap();

        assert!(matches!(
            parse_number::<i64>(sub, "id"),
            Err(Error::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_unknown_entity_is_rejected() {
        assert!(cli()
            .try_get_matches_from(["shoesapp-admin", "count", "shoes"])
            .is_err());
    }
}
