use super::account::parse_date;
use super::{failed, require_session};
use crate::app::AppContext;
use crate::prompt::Prompter;
use anyhow::{Context, Result, anyhow, bail};
use colored::Colorize;
use std::path::{Path, PathBuf};
use zeroth_core::pet::{Disease, NewPet, Pet, PetImage, PetSex};

/// `pets add` arguments.
#[derive(Debug)]
pub struct PetInput {
    pub name: String,
    pub sex: String,
    pub birth_date: String,
    pub neutered: bool,
    pub disease_id: Option<i64>,
    pub image: Option<PathBuf>,
}

pub async fn list(ctx: &AppContext) -> Result<()> {
    require_session(ctx).await?;
    let pets = ctx.pets.list().await.map_err(|e| failed("Loading pets", e))?;
    if pets.is_empty() {
        println!("No pets registered yet. Add one with `zeroth pets add`.");
        return Ok(());
    }

    // Disease names are decoration only
    let diseases = ctx.pets.diseases().await.unwrap_or_else(|e| {
        tracing::warn!("[Pets] Disease catalog unavailable: {}", e);
        Vec::new()
    });
    for pet in &pets {
        println!("{}", pet_line(pet, &diseases));
    }
    Ok(())
}

pub async fn add(ctx: &AppContext, input: PetInput) -> Result<()> {
    let sex: PetSex = input.sex.parse().map_err(|e: String| anyhow!(e))?;
    let pet = NewPet {
        name: input.name.trim().to_string(),
        sex,
        birth_date: parse_date(&input.birth_date)?,
        neutered: input.neutered,
        disease_id: input.disease_id,
    };
    let image = input.image.as_deref().map(read_image).transpose()?;

    require_session(ctx).await?;
    ctx.pets
        .create(&pet, image.as_ref())
        .await
        .map_err(|e| failed("Pet registration", e))?;

    println!("{}", format!("Registered {}.", pet.name).green());
    Ok(())
}

pub async fn delete(ctx: &AppContext, id: i64, yes: bool) -> Result<()> {
    require_session(ctx).await?;
    let pet = ctx
        .pets
        .find(id)
        .await
        .map_err(|e| failed("Delete", e))?
        .ok_or_else(|| anyhow!("No pet with id {id}"))?;

    if !yes {
        let mut prompter = Prompter::new()?;
        if !prompter.confirm(&format!("Delete {}?", pet.label()), false)? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    ctx.pets.delete(id).await.map_err(|e| failed("Delete", e))?;
    println!("{}", format!("Deleted {}.", pet.name).green());
    Ok(())
}

pub async fn upload_image(ctx: &AppContext, id: i64, path: &Path) -> Result<()> {
    let image = read_image(path)?;
    require_session(ctx).await?;
    ctx.pets
        .upload_image(id, &image)
        .await
        .map_err(|e| failed("Image upload", e))?;
    println!("{}", "Image uploaded.".green());
    Ok(())
}

pub async fn diseases(ctx: &AppContext) -> Result<()> {
    let diseases = ctx
        .pets
        .diseases()
        .await
        .map_err(|e| failed("Loading diseases", e))?;
    for disease in diseases {
        println!("{:>4}  {}", disease.id.to_string().bright_black(), disease.name);
    }
    Ok(())
}

fn read_image(path: &Path) -> Result<PetImage> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    if bytes.is_empty() {
        bail!("{} is empty", path.display());
    }
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    Ok(PetImage::new(file_name, bytes))
}

fn pet_line(pet: &Pet, diseases: &[Disease]) -> String {
    let mut line = format!(
        "{:>4}  {}  born {}",
        pet.id,
        pet.label().bold(),
        pet.birth_date.format("%Y-%m-%d")
    );
    if pet.neutered {
        line.push_str(", neutered");
    }
    if let Some(id) = pet.disease_id {
        match diseases.iter().find(|d| d.id == id) {
            Some(disease) => line.push_str(&format!(", {}", disease.name)),
            None => line.push_str(&format!(", condition #{id}")),
        }
    }
    if pet.image.is_some() {
        line.push_str(&format!(" {}", "[photo]".bright_black()));
    }
    line
}
