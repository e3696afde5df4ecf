mod status_sections;
